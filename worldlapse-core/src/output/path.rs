//! Export path construction and collision handling

use std::path::PathBuf;

use crate::clock::WorldDate;

/// File name prefix shared by every exported capture
const NAME_PREFIX: &str = "worldlapse";

/// Which name body a resolved path uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    /// In-world date/time name
    DateTime,
    /// Zero-padded sequential counter name
    Numbered,
}

/// Inputs the resolver needs to build a path
#[derive(Debug, Clone)]
pub struct NamingContext {
    /// Export base directory
    pub base: PathBuf,
    /// Seed string identifying the world
    pub world_seed: String,
    /// Label of the capture surface
    pub surface_label: String,
    /// Group captures into a per-world subdirectory
    pub per_world_subdir: bool,
    /// Local in-world date for date/time names
    pub date: WorldDate,
    /// Fired counter for numbered names
    pub counter: u64,
    /// File extension without the dot
    pub extension: &'static str,
}

/// Resolve the path a capture is written to, creating directories as needed
///
/// Layout is `base[/seed][/manually][/tmp]/<name>.<ext>`. If the computed
/// path already exists the resolver appends `-alt1`, `-alt2`, ... until it
/// finds a free name; an existing capture is never overwritten. Resolving
/// twice without an intervening file creation yields the same path.
pub fn resolve(
    ctx: &NamingContext,
    pattern: NamePattern,
    manually_triggered: bool,
    add_tmp_subdir: bool,
) -> std::io::Result<PathBuf> {
    let name = match pattern {
        NamePattern::DateTime => datetime_name(ctx),
        NamePattern::Numbered => numbered_name(ctx),
    };

    let mut dir = ctx.base.clone();
    if ctx.per_world_subdir {
        dir.push(&ctx.world_seed);
    }
    std::fs::create_dir_all(&dir)?;

    if manually_triggered {
        dir.push("manually");
        std::fs::create_dir_all(&dir)?;
    }
    if add_tmp_subdir {
        dir.push("tmp");
        std::fs::create_dir_all(&dir)?;
    }

    let path = dir.join(format!("{}.{}", name, ctx.extension));
    if !path.exists() {
        return Ok(path);
    }

    let mut i = 1;
    loop {
        let alt = dir.join(format!("{}-alt{}.{}", name, i, ctx.extension));
        if !alt.exists() {
            return Ok(alt);
        }
        i += 1;
    }
}

fn datetime_name(ctx: &NamingContext) -> String {
    format!(
        "{}-{}-{}-{}-{}-{:02}-{:02}",
        NAME_PREFIX,
        ctx.world_seed,
        ctx.surface_label,
        ctx.date.year,
        ctx.date.season,
        ctx.date.day,
        ctx.date.hour
    )
}

fn numbered_name(ctx: &NamingContext) -> String {
    format!(
        "{}-{}-{}-{:06}",
        NAME_PREFIX, ctx.world_seed, ctx.surface_label, ctx.counter
    )
}
