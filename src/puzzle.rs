// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::convert::TryFrom;
use yaml_rust::{Yaml, YamlLoader};
use ansi_term::{Colour, Style, ANSIString};

use super::grid::Grid;
use super::hints::{Hints, is_line_correct};
use super::line::LineId;
use super::util::{ralign, lalign_colored, ralign_joined_coloreds, Direction, Direction::*};
use super::worker::Request;
use super::error::PuzzleError;

/// A grid together with the hints it has to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub grid:  Grid,
    pub hints: Hints,
}

impl Puzzle {
    /// A blank puzzle for the given hints.
    pub fn new(hints: Hints) -> Self {
        Puzzle {
            grid: Grid::new(hints.column.len(), hints.row.len()),
            hints,
        }
    }
    /// The puzzle whose solution is the given committed grid; the grid itself is left blank.
    pub fn from_grid(solution: &Grid) -> Self {
        Self::new(Hints::from_grid(solution))
    }
    pub fn from_picture(picture: &str) -> Result<Self, PuzzleError> {
        let solution = Grid::from_picture(picture).map_err(PuzzleError::Picture)?;
        Ok(Self::from_grid(&solution))
    }

    pub fn width(&self) -> usize { self.grid.width() }
    pub fn height(&self) -> usize { self.grid.height() }
    pub fn is_solved(&self) -> bool {
        self.grid.is_complete()
    }

    pub fn into_request(self, delay: Option<u64>) -> Request {
        Request {
            grid:   self.grid,
            hints:  self.hints,
            status: None,
            delay,
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Puzzle, PuzzleError> {
        let docs: Vec<Yaml> = YamlLoader::load_from_str(s)?;
        let doc = docs.first().ok_or(PuzzleError::EmptyDocument)?;
        Self::from_yaml(doc)
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Puzzle, PuzzleError>
    {
        let row_run_lengths = Self::_parse_lines(&doc["rows"], Row, "rows")?;
        let col_run_lengths = match &doc["cols"] {
            Yaml::BadValue => Self::_parse_lines(&doc["columns"], Column, "cols")?,
            cols           => Self::_parse_lines(cols, Column, "cols")?,
        };
        Ok(Puzzle::new(Hints::new(row_run_lengths, col_run_lengths)))
    }

    fn _parse_lines(input: &Yaml, direction: Direction, key: &'static str)
        -> Result<Vec<Vec<usize>>, PuzzleError>
    {
        let list: &Vec<Yaml> = input.as_vec().ok_or(PuzzleError::MissingKey(key))?;
        list.iter()
            .enumerate()
            .map(|(index, yaml_val)| Self::_parse_line_runs(yaml_val).map_err(|message|
                PuzzleError::InvalidRuns { direction, index, message }))
            .collect()
    }

    fn _parse_line_runs(input: &Yaml) -> Result<Vec<usize>, String> {
        match input {
            Yaml::String(s)  => s.split_whitespace()
                                 .map(|int| int.trim().parse::<usize>().map_err(|e| format!("{:?}: {}", int, e)))
                                 .collect(),
            Yaml::Integer(i) => usize::try_from(*i).map(|len| vec![len])
                                                   .map_err(|_| format!("negative run length {}", i)),
            Yaml::Null       => Ok(vec![]),
            _                => Err(format!("unexpected data type: {:?}", input)),
        }
    }
}

impl Puzzle {
    // helper functions for Puzzle::render
    fn _run_strings(&self, id: LineId) -> Vec<ANSIString<'static>> {
        let style = match is_line_correct(&id.read(&self.grid), self.hints.line(id)) {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        self.hints.line(id).iter()
                           .map(|run| style.paint(run.to_string()))
                           .collect()
    }

    /// Draws the grid with its hints in a box, in the style of a printed puzzle.
    ///
    /// Hints of lines that are complete and correct are greyed out when `emit_color` is set.
    pub fn render(&self, subdivision: Option<usize>, emit_color: bool)
        -> String
    {
        // if subdivision is given, insert visual subdivisor lines across the grid every Nth row/col
        let subdivision = subdivision.filter(|&n| n > 0);
        let row_prefixes: Vec<Vec<ANSIString>> =
            (0..self.height()).map(|y| self._run_strings(LineId::row(y)))
                              .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                       .saturating_sub(1)) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let col_runs: Vec<Vec<ANSIString>> =
            (0..self.width()).map(|x| self._run_strings(LineId::column(x)))
                             .collect();
        let max_col_runs = col_runs.iter()
                                   .map(Vec::len)
                                   .max().unwrap_or(0);

        let mut result = String::new();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(&col_runs, i, prefix_len, subdivision, emit_color));
        }

        let horizontal = |s: &str| (0..self.width()).map(|_| String::from(s)).collect::<Vec<_>>();

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &horizontal("\u{2550}\u{2550}\u{2550}")
        ));

        for y in 0..self.height() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &self.grid.squares[y].iter()
                                     .map(|s| format!(" {:1} ", s.fmt_visual()))
                                     .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &horizontal("\u{2500}\u{2500}\u{2500}")
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &horizontal("\u{2550}\u{2550}\u{2550}")
        ));

        result
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        result
    }

    fn _fmt_header(&self, col_runs: &[Vec<ANSIString>],
                          line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for runs in col_runs {
            let part = if line_idx < runs.len() {
                format!(" {}", lalign_colored(&runs[runs.len()-1-line_idx], 2, emit_color))
            } else {
                format!(" {:-2}", " ")
            };
            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(Some(5), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
rows:
    - 5
    - 1 4
    - ~
    - 0
cols:
    - 2
    - 1 1
";

    #[test]
    fn parses_strings_integers_and_nulls() {
        let puzzle = Puzzle::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(puzzle.hints.row, vec![vec![5], vec![1, 4], vec![], vec![]]);
        assert_eq!(puzzle.hints.column, vec![vec![2], vec![1, 1]]);
        assert_eq!(puzzle.width(), 2);
        assert_eq!(puzzle.height(), 4);
        assert!(!puzzle.is_solved());
    }

    #[test]
    fn accepts_columns_as_key() {
        let puzzle = Puzzle::from_yaml_str("rows: [1]\ncolumns: [1]\n").unwrap();
        assert_eq!(puzzle.hints.column, vec![vec![1]]);
    }

    #[test]
    fn reports_missing_and_malformed_lists() {
        assert!(matches!(Puzzle::from_yaml_str("rows: [1]\n"),
                         Err(PuzzleError::MissingKey("cols"))));
        assert!(matches!(Puzzle::from_yaml_str("rows: [\"1 x\"]\ncols: [1]\n"),
                         Err(PuzzleError::InvalidRuns { direction: Row, index: 0, .. })));
        assert!(matches!(Puzzle::from_yaml_str("rows: [-2]\ncols: [1]\n"),
                         Err(PuzzleError::InvalidRuns { .. })));
        assert!(matches!(Puzzle::from_yaml_str(""), Err(PuzzleError::EmptyDocument)));
    }

    #[test]
    fn picture_derives_hints() {
        let puzzle = Puzzle::from_picture("
            #.#
            ###
        ").unwrap();
        assert_eq!(puzzle.hints.row, vec![vec![1, 1], vec![3]]);
        assert_eq!(puzzle.hints.column, vec![vec![2], vec![1], vec![2]]);
        assert_eq!(puzzle.grid, Grid::new(3, 2));
    }

    #[test]
    fn render_draws_hints_and_box() {
        let puzzle = Puzzle::from_picture("
            #.
            ##
        ").unwrap();
        let rendered = puzzle.render(None, false);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1 + 2 + 2); // one header line, top and bottom border, two rows
        assert!(lines[0].contains('2'));
        assert!(lines[2].starts_with('1'));
        assert!(lines[3].starts_with('2'));
        assert!(!rendered.contains('\u{1b}'));
    }
}
