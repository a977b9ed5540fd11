use anyhow::{bail, format_err, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::opt::PartialOpt;
use crate::solver::Method;

/// A linear system and its solver options as read from a configuration file.
///
/// The file is line oriented:
///
/// ```txt
/// # comment
/// [Solver]
/// type = sor
/// tolerance = 1e-6
/// max_iterations = 1000
/// omega = 1.5
///
/// [Matrix]
/// size = 3
/// A = 4, -1, 0; -1, 4, -1; 0, -1, 4
/// b = 2, 4, 10
/// ```
///
/// Rows of `A` are separated by `;` and entries by `,`. Every key of the
/// `[Solver]` section and `Matrix.size` are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub opt: PartialOpt,
    pub matrix: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
}

/// Reads and parses the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read config file: {}", path.display()))?;
    text.parse::<Config>()
        .with_context(|| format!("invalid config file: {}", path.display()))
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let entries = parse_entries(s);

        let opt = PartialOpt {
            method: parse_entry(&entries, "Solver.type", |v| {
                v.parse::<Method>().map_err(|e| format_err!(e))
            })?,
            tolerance: parse_entry(&entries, "Solver.tolerance", parse_number)?,
            max_iterations: parse_entry(&entries, "Solver.max_iterations", |v| {
                v.parse::<usize>()
                    .with_context(|| format!("invalid iteration count '{}'", v))
            })?,
            omega: parse_entry(&entries, "Solver.omega", parse_number)?,
        };

        let matrix = parse_entry(&entries, "Matrix.A", parse_matrix)?
            .ok_or_else(|| format_err!("missing Matrix.A"))?;
        let rhs = parse_entry(&entries, "Matrix.b", |v| parse_list(v, ','))?
            .ok_or_else(|| format_err!("missing Matrix.b"))?;

        let size = parse_entry(&entries, "Matrix.size", |v| {
            v.parse::<usize>()
                .with_context(|| format!("invalid matrix size '{}'", v))
        })?;
        if let Some(size) = size {
            if size != matrix.len() {
                bail!(
                    "Matrix.size is {} but Matrix.A has {} rows",
                    size,
                    matrix.len()
                );
            }
        }
        log::debug!("read {} x {} matrix", matrix.len(), matrix.first().map_or(0, Vec::len));

        Ok(Config { opt, matrix, rhs })
    }
}

/// Collects `key = value` lines into a map keyed by `Section.key`.
fn parse_entries(s: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    let mut section = "";

    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            section = rest.split(']').next().unwrap_or_default().trim();
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            entries.insert(format!("{}.{}", section, key.trim()), value.trim().to_string());
        }
    }
    entries
}

fn parse_entry<T, F>(entries: &HashMap<String, String>, key: &str, parse: F) -> Result<Option<T>>
where
    F: Fn(&str) -> Result<T>,
{
    entries
        .get(key)
        .map(|v| parse(v.as_str()).with_context(|| format!("bad value for {}", key)))
        .transpose()
}

fn parse_number(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("invalid number '{}'", s))
}

/// Splits `s` on `delimiter`, skipping empty items.
fn parse_list(s: &str, delimiter: char) -> Result<Vec<f64>> {
    s.split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_number)
        .collect()
}

fn parse_matrix(s: &str) -> Result<Vec<Vec<f64>>> {
    s.split(';')
        .filter(|row| !row.trim().is_empty())
        .enumerate()
        .map(|(i, row)| parse_list(row, ',').with_context(|| format!("row {}", i + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    const EXAMPLE: &str = "# dominant 3x3 system
[Solver]
type = sor
tolerance = 1e-8
max_iterations = 500
omega = 1.2

[Matrix]
size = 3
A = 4, -1, 0; -1, 4, -1; 0, -1, 4
b = 2, 4, 10
";

    #[test]
    fn test_parse() -> Result<()> {
        let config: Config = EXAMPLE.parse()?;
        assert_eq!(config.opt.method, Some(Method::Sor));
        assert_eq!(config.opt.tolerance, Some(1e-8));
        assert_eq!(config.opt.max_iterations, Some(500));
        assert_eq!(config.opt.omega, Some(1.2));
        assert_eq!(
            config.matrix,
            vec![
                vec![4.0, -1.0, 0.0],
                vec![-1.0, 4.0, -1.0],
                vec![0.0, -1.0, 4.0]
            ]
        );
        assert_eq!(config.rhs, vec![2.0, 4.0, 10.0]);
        Ok(())
    }

    #[test]
    fn test_optional_solver_section() -> Result<()> {
        let config: Config = "[Matrix]\nA = 2,1;1,3;\nb = 3,5\n".parse()?;
        assert_eq!(config.opt, PartialOpt::default());
        assert_eq!(config.matrix, vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
        Ok(())
    }

    #[test]
    fn test_ragged_rows_are_kept() -> Result<()> {
        let config: Config = "[Matrix]\nA = 1,0,0; 0,1; 0,0,1\nb = 1,1,1\n".parse()?;
        assert_eq!(config.matrix[1], vec![0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_windows_line_endings() -> Result<()> {
        let config: Config = "[Solver]\r\ntype = gauss\r\n[Matrix]\r\nA = 1\r\nb = 2\r\n".parse()?;
        assert_eq!(config.opt.method, Some(Method::Gauss));
        assert_eq!(config.rhs, vec![2.0]);
        Ok(())
    }

    #[test]
    fn test_errors() {
        assert!("[Matrix]\nb = 1\n".parse::<Config>().is_err());
        assert!("[Matrix]\nA = 1\n".parse::<Config>().is_err());
        assert!("[Matrix]\nA = 1, x\nb = 1\n".parse::<Config>().is_err());
        assert!("[Matrix]\nsize = 2\nA = 1\nb = 1\n".parse::<Config>().is_err());
        assert!("[Solver]\ntype = lu\n[Matrix]\nA = 1\nb = 1\n"
            .parse::<Config>()
            .is_err());
        assert!("[Solver]\nmax_iterations = -3\n[Matrix]\nA = 1\nb = 1\n"
            .parse::<Config>()
            .is_err());
    }

    #[test]
    fn test_keys_are_section_scoped() -> Result<()> {
        // a `type` outside [Solver] is not the solver type
        let config: Config = "type = sor\n[Matrix]\nA = 1\nb = 1\n".parse()?;
        assert_eq!(config.opt.method, None);
        Ok(())
    }
}
