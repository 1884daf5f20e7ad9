use serde::Serialize;

use crate::board::{Mark, NUM_CELLS};
use crate::game::Round;

pub const CELL_ATTR: &str = "data-cell";

const MAIN_STYLE: &str = "display:flex;flex-direction:column;justify-content:space-between;\
align-items:center;min-height:100vh;padding:6rem";
const FRAME_STYLE: &str = "background:black;max-width:480px;width:480px;position:relative;padding:12px";
const GRID_STYLE: &str = "width:100%;height:480px;display:grid;grid-template-columns:auto auto auto;\
gap:4px;background:white";
const CELL_STYLE: &str = "display:flex;align-items:center;justify-content:center;width:100%;\
height:100%;margin:auto;cursor:pointer;color:white;background:black";
const ICON_STYLE: &str = "width:80px;height:80px;color:white";
const SCORES_STYLE: &str = "margin:auto;display:flex;justify-content:space-between;width:300px;\
color:white;bottom:0";

/// Icon drawn in a marked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Circle,
    Cross,
}

impl Glyph {
    /// SVG path data in a 24x24 view box.
    pub fn path(self) -> &'static str {
        match self {
            Glyph::Circle => "M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            Glyph::Cross => "M6 18L18 6M6 6l12 12",
        }
    }
}

/// X is drawn as a circle and O as a cross. Kept as the page has always shown it.
pub fn glyph_for(cell: Option<Mark>) -> Option<Glyph> {
    match cell {
        Some(Mark::X) => Some(Glyph::Circle),
        Some(Mark::O) => Some(Glyph::Cross),
        None => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub index: usize,
    pub glyph: Option<Glyph>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreView {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub cells: Vec<CellView>,
    pub scores: Vec<ScoreView>,
}

impl ViewModel {
    pub fn from_round(round: &Round) -> Self {
        let cells = round
            .board
            .cells()
            .into_iter()
            .enumerate()
            .map(|(index, cell)| CellView {
                index,
                glyph: glyph_for(cell),
            })
            .collect();

        let scores = vec![
            ScoreView {
                label: "PLAYER 1 (x)",
                value: round.scores.x,
            },
            ScoreView {
                label: "TIE",
                value: round.scores.tie,
            },
            ScoreView {
                label: "PLAYER 2 (O)",
                value: round.scores.o,
            },
        ];

        Self { cells, scores }
    }
}

/// Renders the grid and score row as HTML. Every cell carries `data-cell="<index>"`.
pub fn render_markup(view: &ViewModel) -> String {
    debug_assert_eq!(view.cells.len(), NUM_CELLS);

    let mut html = String::with_capacity(4096);
    html.push_str(&format!(
        r#"<main style="{MAIN_STYLE}"><div style="{FRAME_STYLE}"><div style="{GRID_STYLE}">"#
    ));

    for cell in &view.cells {
        html.push_str(&cell_markup(cell));
    }

    html.push_str(&format!(r#"</div><div style="{SCORES_STYLE}">"#));
    for score in &view.scores {
        html.push_str(&format!(
            "<div><p>{}</p><p>{}</p></div>",
            score.label, score.value
        ));
    }
    html.push_str("</div></div></main>");

    html
}

fn cell_markup(cell: &CellView) -> String {
    let path = cell
        .glyph
        .map(|glyph| {
            format!(
                r#"<path stroke-linecap="round" stroke-linejoin="round" d="{}"/>"#,
                glyph.path()
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div {CELL_ATTR}="{}" style="{CELL_STYLE}"><svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor" style="{ICON_STYLE}">{path}</svg></div>"#,
        cell.index
    )
}
