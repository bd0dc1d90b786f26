//! Typed levels for the three puzzle families and their query-string codec.
//!
//! A level string looks like `x=3&y=2&board=ab.,aab` plus family-specific
//! fields (`depth`/`pieces` for Modulo, `minpath`/`maxpath` for Runaway).
//! Parsing validates everything up front so the engines never see a
//! malformed board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::error::ParseError;
use crate::query::{encode_component, QueryParams};

/// Puzzle family, the tag the verifier dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Modulo,
    Runaway,
    Bricolage,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Modulo, Family::Runaway, Family::Bricolage];

    pub fn name(self) -> &'static str {
        match self {
            Family::Modulo => "modulo",
            Family::Runaway => "runaway",
            Family::Bricolage => "bricolage",
        }
    }

    /// Infer the family of a level that was not tagged by the caller.
    ///
    /// An explicit `game=` field wins. Otherwise Modulo levels are recognised
    /// by `depth`/`pieces`, Runaway levels by `minpath`/`maxpath`, and
    /// anything else is Bricolage.
    pub fn detect(params: &QueryParams) -> Result<Family, ParseError> {
        if let Some(game) = params.get("game").filter(|g| !g.is_empty()) {
            return game.parse();
        }
        if params.contains("depth") || params.contains("pieces") {
            Ok(Family::Modulo)
        } else if params.contains("minpath") || params.contains("maxpath") {
            Ok(Family::Runaway)
        } else {
            Ok(Family::Bricolage)
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Family::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownGame(s.to_string()))
    }
}

/// A Modulo piece: filled offsets from the top-left of its bounding box.
/// Translation only; pieces are never rotated or reflected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    cells: SmallVec<[(usize, usize); 8]>,
    width: usize,
    height: usize,
}

impl Piece {
    /// Build a piece from filled cells. The shape is shifted so its minimum
    /// `x` and `y` are zero and the offsets are sorted. `None` if empty.
    pub fn from_cells(cells: impl IntoIterator<Item = (usize, usize)>) -> Option<Self> {
        let mut cells: SmallVec<[(usize, usize); 8]> = cells.into_iter().collect();
        let min_x = cells.iter().map(|&(x, _)| x).min()?;
        let min_y = cells.iter().map(|&(_, y)| y).min()?;
        for cell in &mut cells {
            cell.0 -= min_x;
            cell.1 -= min_y;
        }
        cells.sort_unstable();
        cells.dedup();
        let width = cells.iter().map(|&(x, _)| x).max()? + 1;
        let height = cells.iter().map(|&(_, y)| y).max()? + 1;
        Some(Self {
            cells,
            width,
            height,
        })
    }

    /// Parse one `|`-separated entry such as `XX.,.XX`. `index` is only used
    /// for diagnostics.
    pub fn parse(raw: &str, index: usize) -> Result<Self, ParseError> {
        let mut cells = Vec::new();
        let mut row_len = None;
        for (y, row) in raw.split(',').enumerate() {
            let mut x = 0;
            for ch in row.chars().filter(|c| !c.is_whitespace()) {
                match ch {
                    'X' | 'x' => cells.push((x, y)),
                    '.' => {}
                    _ => return Err(ParseError::PieceChar { ch, piece: index }),
                }
                x += 1;
            }
            match row_len {
                None => row_len = Some(x),
                Some(len) if len != x => return Err(ParseError::RaggedPiece { piece: index }),
                Some(_) => {}
            }
        }
        Self::from_cells(cells).ok_or(ParseError::EmptyPiece { piece: index })
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Bounding-box width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bounding-box height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The `X`/`.` pattern, rows separated by commas.
    pub fn to_pattern(&self) -> String {
        let mut grid = vec![vec!['.'; self.width]; self.height];
        for &(x, y) in &self.cells {
            grid[y][x] = 'X';
        }
        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Runaway cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Open,
    Blocked,
}

/// Bricolage block color. Letters map to 1..=26 case-insensitively, digits
/// 1..=9 to their value, so `a` and `1` are the same color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color(u8);

impl Color {
    pub fn new(id: u8) -> Option<Self> {
        (1..=26).contains(&id).then_some(Self(id))
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' => Some(Self(ch as u8 - b'a' + 1)),
            'A'..='Z' => Some(Self(ch as u8 - b'A' + 1)),
            '1'..='9' => Some(Self(ch as u8 - b'0')),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        (b'a' + self.0 - 1) as char
    }
}

/// A Bricolage cell; `None` is empty.
pub type Block = Option<Color>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuloLevel {
    pub depth: u8,
    pub board: Board<u8>,
    pub pieces: Vec<Piece>,
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunawayLevel {
    pub board: Board<Terrain>,
    pub minpath: usize,
    pub maxpath: usize,
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BricolageLevel {
    pub board: Board<Block>,
    pub id: Option<i64>,
}

/// A parsed level. Immutable once built; each verification clones the board
/// it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Modulo(ModuloLevel),
    Runaway(RunawayLevel),
    Bricolage(BricolageLevel),
}

impl Level {
    /// Parse a level string. With `family == None` the family is inferred
    /// from the fields present (see [`Family::detect`]).
    pub fn parse(raw: &str, family: Option<Family>) -> Result<Self, ParseError> {
        let params = QueryParams::parse(raw);
        let family = match family {
            Some(family) => family,
            None => Family::detect(&params)?,
        };
        match family {
            Family::Modulo => ModuloLevel::from_params(&params).map(Level::Modulo),
            Family::Runaway => RunawayLevel::from_params(&params).map(Level::Runaway),
            Family::Bricolage => BricolageLevel::from_params(&params).map(Level::Bricolage),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Level::Modulo(_) => Family::Modulo,
            Level::Runaway(_) => Family::Runaway,
            Level::Bricolage(_) => Family::Bricolage,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Level::Modulo(l) => l.board.width(),
            Level::Runaway(l) => l.board.width(),
            Level::Bricolage(l) => l.board.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Level::Modulo(l) => l.board.height(),
            Level::Runaway(l) => l.board.height(),
            Level::Bricolage(l) => l.board.height(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Level::Modulo(l) => l.id,
            Level::Runaway(l) => l.id,
            Level::Bricolage(l) => l.id,
        }
    }

    /// Canonical encoding. Parsing the result yields an equal level.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![
            format!("x={}", self.width()),
            format!("y={}", self.height()),
        ];
        match self {
            Level::Modulo(l) => {
                parts.push(format!("depth={}", l.depth));
                parts.push(format!("board={}", encode_board(&l.board, |v| v.to_string())));
                let pieces: Vec<String> = l.pieces.iter().map(Piece::to_pattern).collect();
                parts.push(format!("pieces={}", encode_component(&pieces.join("|"))));
            }
            Level::Runaway(l) => {
                parts.push(format!(
                    "board={}",
                    encode_board(&l.board, |t| match t {
                        Terrain::Open => ".".to_string(),
                        Terrain::Blocked => "X".to_string(),
                    })
                ));
                parts.push(format!("minpath={}", l.minpath));
                parts.push(format!("maxpath={}", l.maxpath));
            }
            Level::Bricolage(l) => {
                parts.push(format!(
                    "board={}",
                    encode_board(&l.board, |b| b.map_or('.', Color::to_char).to_string())
                ));
            }
        }
        if let Some(id) = self.id() {
            parts.push(format!("level={id}"));
        }
        parts.join("&")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl ModuloLevel {
    fn from_params(params: &QueryParams) -> Result<Self, ParseError> {
        let (width, height) = dimensions(params)?;
        let depth: usize = params.require_number("depth")?;
        if !(1..=255).contains(&depth) {
            return Err(ParseError::OutOfRange {
                field: "depth",
                value: depth,
                min: 1,
                max: 255,
            });
        }
        let depth = depth as u8;
        let board = parse_board(params, width, height, |ch| {
            ch.to_digit(10)
                .map(|d| d as u8)
                .filter(|&d| d < depth)
        })?;

        let pieces = params
            .require("pieces")?
            .split('|')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .enumerate()
            .map(|(i, raw)| Piece::parse(raw, i))
            .collect::<Result<Vec<_>, _>>()?;
        if pieces.is_empty() {
            return Err(ParseError::NoPieces);
        }

        Ok(Self {
            depth,
            board,
            pieces,
            id: level_id(params),
        })
    }
}

impl RunawayLevel {
    fn from_params(params: &QueryParams) -> Result<Self, ParseError> {
        let (width, height) = dimensions(params)?;
        let board = parse_board(params, width, height, |ch| match ch {
            '.' => Some(Terrain::Open),
            'X' => Some(Terrain::Blocked),
            _ => None,
        })?;

        let (minpath, maxpath) = match (
            params.optional_number("minpath")?,
            params.optional_number("maxpath")?,
        ) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                let min = 1 + width / 3;
                (min, min + width / 4)
            }
        };
        if minpath == 0 || minpath > maxpath {
            return Err(ParseError::PathRange { minpath, maxpath });
        }

        Ok(Self {
            board,
            minpath,
            maxpath,
            id: level_id(params),
        })
    }
}

impl BricolageLevel {
    fn from_params(params: &QueryParams) -> Result<Self, ParseError> {
        let (width, height) = dimensions(params)?;
        let board = parse_board(params, width, height, |ch| match ch {
            '.' => Some(None),
            // `0` would be ambiguous with the empty marker.
            '0' => None,
            _ => Color::from_char(ch).map(Some),
        })?;
        Ok(Self {
            board,
            id: level_id(params),
        })
    }
}

/// Moves address cells with single bytes, so no coordinate past 255 is
/// reachable.
pub const MAX_DIMENSION: usize = 256;

fn dimensions(params: &QueryParams) -> Result<(usize, usize), ParseError> {
    let width = dimension(params, "x")?;
    let height = dimension(params, "y")?;
    Ok((width, height))
}

fn dimension(params: &QueryParams, field: &'static str) -> Result<usize, ParseError> {
    let value: usize = params.require_number(field)?;
    if value == 0 {
        return Err(ParseError::Zero(field));
    }
    if value > MAX_DIMENSION {
        return Err(ParseError::OutOfRange {
            field,
            value,
            min: 1,
            max: MAX_DIMENSION,
        });
    }
    Ok(value)
}

/// The `level` id is informational; an unparsable value is dropped.
fn level_id(params: &QueryParams) -> Option<i64> {
    params.get("level").and_then(|v| v.trim().parse().ok())
}

/// Commas and whitespace are layout only. The remaining characters are the
/// cells, row by row.
fn parse_board<T: Copy>(
    params: &QueryParams,
    width: usize,
    height: usize,
    decode: impl Fn(char) -> Option<T>,
) -> Result<Board<T>, ParseError> {
    let raw = params.require("board")?;
    let tokens: Vec<char> = raw
        .chars()
        .filter(|&c| c != ',' && !c.is_whitespace())
        .collect();
    let expected = width
        .checked_mul(height)
        .ok_or(ParseError::OutOfRange {
            field: "x*y",
            value: width,
            min: 1,
            max: usize::MAX / height.max(1),
        })?;
    if tokens.len() != expected {
        return Err(ParseError::BoardLength {
            expected,
            actual: tokens.len(),
        });
    }
    let cells = tokens
        .iter()
        .enumerate()
        .map(|(index, &ch)| decode(ch).ok_or(ParseError::BoardCell { ch, index }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Board::from_rows(width, height, &cells))
}

fn encode_board<T: Copy>(board: &Board<T>, cell: impl Fn(T) -> String) -> String {
    board
        .rows()
        .into_iter()
        .map(|row| row.into_iter().map(&cell).collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
}
