use crate::error::BuildError;
use std::io::BufRead as _;
use std::path::Path;

/// One `target: prereqs` rule and the tab-indented recipe lines that follow it.
#[derive(Debug, Clone)]
pub struct Rule {
    pub target: String,
    pub prereqs: Vec<String>,
    pub commands: Vec<Vec<String>>,
}

/// The parsed form of a rule file: an ordered list of rules. The default
/// target is the target of the first rule, matching `mmake.c`'s
/// `makefile_default_target`.
#[derive(Debug, Clone, Default)]
pub struct Makefile {
    rules: Vec<Rule>,
}

impl Makefile {
    /// Reads and parses a rule file.
    ///
    /// Blank lines and `#`-comment lines between rules are skipped. Each
    /// rule is a `target: prereq...` header line followed by zero or more
    /// tab-indented command lines; a header line with no command lines is
    /// a rule with an empty recipe (nothing to rebuild).
    pub fn parse(path: &Path) -> Result<Self, BuildError> {
        let file = std::fs::File::open(path).map_err(|source| BuildError::OpenMakefile {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);

        let mut rules = Vec::new();
        let mut current: Option<Rule> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|source| BuildError::OpenMakefile {
                path: path.to_path_buf(),
                source,
            })?;

            if line.starts_with('\t') {
                let rule = current.as_mut().ok_or_else(|| BuildError::MalformedRule {
                    line: line_no,
                    text: line.clone(),
                })?;
                let command: Vec<String> = line.trim().split_whitespace().map(String::from).collect();
                if command.is_empty() {
                    return Err(BuildError::EmptyCommand { target: rule.target.clone(), line: line_no });
                }
                rule.commands.push(command);
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(finished) = current.take() {
                rules.push(finished);
            }

            let Some((target, prereqs)) = trimmed.split_once(':') else {
                return Err(BuildError::MalformedRule { line: line_no, text: line });
            };
            current = Some(Rule {
                target: target.trim().to_owned(),
                prereqs: prereqs.split_whitespace().map(String::from).collect(),
                commands: Vec::new(),
            });
        }

        if let Some(finished) = current.take() {
            rules.push(finished);
        }

        Ok(Self { rules })
    }

    #[must_use]
    pub fn rule(&self, target: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.target == target)
    }

    #[must_use]
    pub fn default_target(&self) -> Option<&str> {
        self.rules.first().map(|rule| rule.target.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Makefile;
    use std::io::Write as _;

    fn write_fixture(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "coursetools_mmakefile_test_{:?}",
            std::thread::current().id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_a_simple_rule() {
        let path = write_fixture("out: in.c\n\tgcc -o out in.c\n");
        let mf = Makefile::parse(&path).unwrap();
        let rule = mf.rule("out").unwrap();
        assert_eq!(rule.prereqs, vec!["in.c".to_owned()]);
        assert_eq!(rule.commands, vec![vec!["gcc".to_owned(), "-o".to_owned(), "out".to_owned(), "in.c".to_owned()]]);
        assert_eq!(mf.default_target(), Some("out"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn skips_blank_lines_and_comments_between_rules() {
        let path = write_fixture("# comment\n\na: b\n\tcmd1\n\n# another\nb:\n\tcmd2\n");
        let mf = Makefile::parse(&path).unwrap();
        assert!(mf.rule("a").is_some());
        assert!(mf.rule("b").is_some());
        assert_eq!(mf.rule("b").unwrap().prereqs, Vec::<String>::new());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_a_command_line_with_no_preceding_rule() {
        let path = write_fixture("\tcmd1\n");
        assert!(Makefile::parse(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
