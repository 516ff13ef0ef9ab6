use super::makefile::Makefile;
use crate::error::BuildError;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

/// Builds `target` from `mf`: recursively builds prerequisites depth-first,
/// then rebuilds `target` itself if it's missing, older than any
/// prerequisite, or `force_rebuild` is set.
///
/// A target with no rule is only an error if no file of that name exists
/// on disk either (mirrors `build.c`'s `access(target_name, F_OK)` check).
pub fn build_target(target: &str, mf: &Makefile, force_rebuild: bool, silent: bool) -> Result<(), BuildError> {
    let Some(rule) = mf.rule(target) else {
        return if Path::new(target).exists() {
            Ok(())
        } else {
            Err(BuildError::NoRuleForTarget { target: target.to_owned() })
        };
    };

    for prereq in &rule.prereqs {
        build_target(prereq, mf, force_rebuild, silent)?;
    }

    let rebuild = force_rebuild || needs_rebuild(target, &rule.prereqs);
    if rebuild {
        for command in &rule.commands {
            run_build_cmd(command, target, silent)?;
        }
    }

    Ok(())
}

fn needs_rebuild(target: &str, prereqs: &[String]) -> bool {
    let Ok(target_meta) = std::fs::metadata(target) else {
        return true;
    };
    let Ok(target_mtime) = target_meta.modified() else {
        return true;
    };

    prereqs.iter().any(|prereq| {
        std::fs::metadata(prereq)
            .and_then(|meta| meta.modified())
            .is_ok_and(|prereq_mtime: SystemTime| prereq_mtime > target_mtime)
    })
}

fn run_build_cmd(command: &[String], target: &str, silent: bool) -> Result<(), BuildError> {
    if !silent {
        println!("{}", command.join(" "));
    }

    let status = Command::new(&command[0])
        .args(&command[1..])
        .status()
        .map_err(|source| BuildError::CommandSpawn { target: target.to_owned(), source })?;

    if status.success() {
        Ok(())
    } else {
        Err(BuildError::CommandFailed { target: target.to_owned() })
    }
}
