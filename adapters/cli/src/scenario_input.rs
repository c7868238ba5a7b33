use fire_escape_core::MAX_GRID_DIMENSION;
use serde::Deserialize;
use thiserror::Error;

/// Manifest version understood by [`parse_manifest`].
pub(crate) const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Board layout read from a batch, before grid validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Scenario {
    /// Display name used in reports and error messages.
    pub(crate) name: String,
    /// Raw board rows, top row first.
    pub(crate) rows: Vec<String>,
}

/// Errors raised while reading a scenario batch.
#[derive(Debug, Error)]
pub(crate) enum ScenarioInputError {
    /// The text batch did not start with a scenario count.
    #[error("batch is missing the scenario count")]
    MissingCount,
    /// The scenario count was not a non-negative integer.
    #[error("scenario count '{0}' is not a non-negative integer")]
    InvalidCount(String),
    /// The batch ended before the dimensions of a scenario.
    #[error("scenario {scenario} is missing its dimensions")]
    MissingDimensions {
        /// One-based position of the scenario in the batch.
        scenario: usize,
    },
    /// A dimension was not an integer between one and the board size limit.
    #[error(
        "scenario {scenario} has invalid dimension '{value}'; expected 1 to {}",
        MAX_GRID_DIMENSION
    )]
    InvalidDimension {
        /// One-based position of the scenario in the batch.
        scenario: usize,
        /// Offending token.
        value: String,
    },
    /// The batch ended before all rows of a scenario were read.
    #[error("scenario {scenario} ended after {read} of {expected} rows")]
    MissingRow {
        /// One-based position of the scenario in the batch.
        scenario: usize,
        /// Number of rows read before the input ran out.
        read: usize,
        /// Number of rows announced by the dimensions.
        expected: usize,
    },
    /// A row did not have the announced number of columns.
    #[error("scenario {scenario} row {row} has {found} columns, expected {expected}")]
    RowLength {
        /// One-based position of the scenario in the batch.
        scenario: usize,
        /// One-based row number within the scenario.
        row: usize,
        /// Number of columns announced by the dimensions.
        expected: usize,
        /// Number of columns found in the row.
        found: usize,
    },
    /// Tokens remained after the announced scenarios.
    #[error("unexpected trailing input '{0}' after the last scenario")]
    TrailingInput(String),
    /// The manifest was not valid TOML for the expected schema.
    #[error("failed to parse scenario manifest")]
    Manifest(#[from] toml::de::Error),
    /// The manifest declared a version this build cannot read.
    #[error("unsupported scenario manifest version {found}; expected {}", SUPPORTED_MANIFEST_VERSION)]
    UnsupportedVersion {
        /// Version declared by the manifest.
        found: u32,
    },
}

/// Reads the plain-text batch format.
///
/// The input is whitespace separated: a scenario count, then per scenario a
/// `rows columns` pair followed by `rows` board rows of exactly `columns`
/// symbols each. Scenarios are named after their position in the batch.
pub(crate) fn parse_text(input: &str) -> Result<Vec<Scenario>, ScenarioInputError> {
    let mut tokens = input.split_whitespace();

    let count_token = tokens.next().ok_or(ScenarioInputError::MissingCount)?;
    let count = count_token
        .parse::<usize>()
        .map_err(|_| ScenarioInputError::InvalidCount(count_token.to_owned()))?;

    let mut scenarios = Vec::new();
    for scenario in 1..=count {
        let rows = parse_dimension(tokens.next(), scenario)?;
        let columns = parse_dimension(tokens.next(), scenario)?;

        let mut board = Vec::with_capacity(rows);
        for row in 1..=rows {
            let line = tokens.next().ok_or(ScenarioInputError::MissingRow {
                scenario,
                read: row - 1,
                expected: rows,
            })?;
            let found = line.chars().count();
            if found != columns {
                return Err(ScenarioInputError::RowLength {
                    scenario,
                    row,
                    expected: columns,
                    found,
                });
            }
            board.push(line.to_owned());
        }

        scenarios.push(Scenario {
            name: format!("scenario-{scenario}"),
            rows: board,
        });
    }

    if let Some(extra) = tokens.next() {
        return Err(ScenarioInputError::TrailingInput(extra.to_owned()));
    }

    Ok(scenarios)
}

fn parse_dimension(token: Option<&str>, scenario: usize) -> Result<usize, ScenarioInputError> {
    let token = token.ok_or(ScenarioInputError::MissingDimensions { scenario })?;
    let limit = usize::try_from(MAX_GRID_DIMENSION).unwrap_or(usize::MAX);
    match token.parse::<usize>() {
        Ok(value) if (1..=limit).contains(&value) => Ok(value),
        _ => Err(ScenarioInputError::InvalidDimension {
            scenario,
            value: token.to_owned(),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    scenarios: Vec<ManifestScenario>,
}

#[derive(Debug, Deserialize)]
struct ManifestScenario {
    name: Option<String>,
    grid: Vec<String>,
}

/// Reads a versioned TOML scenario manifest.
pub(crate) fn parse_manifest(contents: &str) -> Result<Vec<Scenario>, ScenarioInputError> {
    let manifest: Manifest = toml::from_str(contents)?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        return Err(ScenarioInputError::UnsupportedVersion {
            found: manifest.version,
        });
    }

    Ok(manifest
        .scenarios
        .into_iter()
        .enumerate()
        .map(|(index, scenario)| Scenario {
            name: scenario
                .name
                .unwrap_or_else(|| format!("scenario-{}", index + 1)),
            rows: scenario.grid,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_text_batch() {
        let input = "2\n1 5\nD...S\n2 3\nD.F\n..S\n";

        let scenarios = parse_text(input).expect("batch parses");

        assert_eq!(
            scenarios,
            vec![
                Scenario {
                    name: "scenario-1".to_owned(),
                    rows: vec!["D...S".to_owned()],
                },
                Scenario {
                    name: "scenario-2".to_owned(),
                    rows: vec!["D.F".to_owned(), "..S".to_owned()],
                },
            ]
        );
    }

    #[test]
    fn empty_batch_is_allowed() {
        assert!(parse_text("0").expect("batch parses").is_empty());
    }

    #[test]
    fn rejects_missing_count() {
        assert!(matches!(
            parse_text("   \n"),
            Err(ScenarioInputError::MissingCount)
        ));
    }

    #[test]
    fn rejects_bad_count() {
        let error = parse_text("two").expect_err("count is not a number");
        assert_eq!(
            error.to_string(),
            "scenario count 'two' is not a non-negative integer"
        );
    }

    #[test]
    fn rejects_zero_dimension() {
        assert!(matches!(
            parse_text("1\n0 3\n"),
            Err(ScenarioInputError::InvalidDimension { scenario: 1, .. })
        ));
    }

    #[test]
    fn rejects_oversized_count_without_allocating() {
        assert!(matches!(
            parse_text("18446744073709551615\n1 3\nDFS\n"),
            Err(ScenarioInputError::MissingDimensions { scenario: 2 })
        ));
    }

    #[test]
    fn rejects_dimensions_above_board_limit() {
        let error = parse_text("1\n18446744073709551615 3\nDFS\n").expect_err("too many rows");
        assert!(matches!(
            error,
            ScenarioInputError::InvalidDimension { scenario: 1, .. }
        ));
        assert_eq!(
            error.to_string(),
            "scenario 1 has invalid dimension '18446744073709551615'; expected 1 to 1000"
        );

        assert!(matches!(
            parse_text("1\n1 1001\nDFS\n"),
            Err(ScenarioInputError::InvalidDimension { scenario: 1, value }) if value == "1001"
        ));
        assert!(parse_text("1\n1 1000\nDFS\n").is_err_and(|error| matches!(
            error,
            ScenarioInputError::RowLength { found: 3, expected: 1000, .. }
        )));
    }

    #[test]
    fn rejects_short_rows() {
        let error = parse_text("1\n2 3\nD.F\n.S\n").expect_err("row too short");
        assert_eq!(
            error.to_string(),
            "scenario 1 row 2 has 2 columns, expected 3"
        );
    }

    #[test]
    fn rejects_truncated_batch() {
        assert!(matches!(
            parse_text("2\n1 3\nDFS\n2 3\nD..\n"),
            Err(ScenarioInputError::MissingRow {
                scenario: 2,
                read: 1,
                expected: 2,
            })
        ));
        assert!(matches!(
            parse_text("2\n1 3\nDFS\n"),
            Err(ScenarioInputError::MissingDimensions { scenario: 2 })
        ));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(matches!(
            parse_text("1\n1 3\nDFS\nextra\n"),
            Err(ScenarioInputError::TrailingInput(token)) if token == "extra"
        ));
    }

    #[test]
    fn reads_manifest() {
        let contents = r#"
            version = 1

            [[scenarios]]
            name = "corridor"
            grid = ["D...S......F"]

            [[scenarios]]
            grid = ["D.F", "..S"]
        "#;

        let scenarios = parse_manifest(contents).expect("manifest parses");

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "corridor");
        assert_eq!(scenarios[0].rows, vec!["D...S......F".to_owned()]);
        assert_eq!(scenarios[1].name, "scenario-2");
    }

    #[test]
    fn rejects_unsupported_manifest_version() {
        let error = parse_manifest("version = 2\n").expect_err("version 2 is unknown");
        assert_eq!(
            error.to_string(),
            "unsupported scenario manifest version 2; expected 1"
        );
    }

    #[test]
    fn rejects_malformed_manifest() {
        assert!(matches!(
            parse_manifest("version = \"one\""),
            Err(ScenarioInputError::Manifest(_))
        ));
    }
}
