//! Board and pipeline navigation state for the deals work area.
//!
//! SYSTEM CONTEXT
//! ==============
//! The deals page resolves which board and pipeline are current from the URL
//! (`id`, `pipelineId`) or, failing that, from `dealBoardGetLast` and the
//! board's first pipeline. The main action bar lists the *other* boards and
//! pipelines as links that keep the current view type.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use crate::net::types::{Board, Pipeline};

/// Which rendering of a pipeline is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewType {
    #[default]
    Board,
    Calendar,
}

impl ViewType {
    /// Path segment under `/deal/`.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Calendar => "calendar",
        }
    }

    /// Detect the view from a location path.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains("calendar") { Self::Calendar } else { Self::Board }
    }

    /// Date range filters only apply to the board view.
    #[must_use]
    pub fn shows_date_filters(self) -> bool {
        self == Self::Board
    }
}

/// Board inventory plus the resolved current board/pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DealBoardState {
    pub boards: Vec<Board>,
    pub current_board: Option<Board>,
    pub current_pipeline: Option<Pipeline>,
    pub view: ViewType,
    pub loading: bool,
    pub error: Option<String>,
}

impl DealBoardState {
    /// Set the current board and pick the pipeline named by `pipeline_id`,
    /// falling back to the board's first pipeline.
    pub fn select(&mut self, board: Board, pipeline_id: Option<&str>) {
        self.current_pipeline = resolve_pipeline(&board, pipeline_id);
        self.current_board = Some(board);
        self.loading = false;
        self.error = None;
    }

    #[must_use]
    pub fn current_board_id(&self) -> Option<&str> {
        self.current_board.as_ref().map(|b| b.id.as_str())
    }

    #[must_use]
    pub fn current_pipeline_id(&self) -> Option<&str> {
        self.current_pipeline.as_ref().map(|p| p.id.as_str())
    }
}

/// Pipeline `pipeline_id` of `board`, else its first pipeline.
#[must_use]
pub fn resolve_pipeline(board: &Board, pipeline_id: Option<&str>) -> Option<Pipeline> {
    pipeline_id
        .and_then(|id| board.pipelines.iter().find(|p| p.id == id))
        .or_else(|| board.pipelines.first())
        .cloned()
}

/// Boards to list in the board switcher.
///
/// Empty when there is nothing else to switch to, which the caller renders
/// as "No other boards".
#[must_use]
pub fn other_boards<'a>(boards: &'a [Board], current: Option<&Board>) -> Vec<&'a Board> {
    if boards.is_empty() || (current.is_some() && boards.len() == 1) {
        return Vec::new();
    }
    boards.iter().filter(|b| current.is_none_or(|c| c.id != b.id)).collect()
}

/// Pipelines of `board` other than `current`; empty renders "No other pipeline".
#[must_use]
pub fn other_pipelines<'a>(board: Option<&'a Board>, current: Option<&Pipeline>) -> Vec<&'a Pipeline> {
    let Some(board) = board else {
        return Vec::new();
    };
    let pipelines = &board.pipelines;
    if pipelines.is_empty() || (current.is_some() && pipelines.len() == 1) {
        return Vec::new();
    }
    pipelines.iter().filter(|p| current.is_none_or(|c| c.id != p.id)).collect()
}

/// Fill in `board.pipelines` from a separate pipelines query when the board
/// payload carried none. Pipelines tagged with another board are skipped.
pub fn attach_pipelines(board: &mut Board, pipelines: Vec<Pipeline>) {
    if !board.pipelines.is_empty() {
        return;
    }
    board.pipelines = pipelines
        .into_iter()
        .filter(|p| p.board_id.as_deref().is_none_or(|id| id == board.id))
        .collect();
}

/// Link to `board`, opening its first pipeline when it has one.
#[must_use]
pub fn board_link(view: ViewType, board: &Board) -> String {
    deal_link(view, &board.id, board.pipelines.first().map(|p| p.id.as_str()))
}

/// Link to `pipeline` inside `board`.
#[must_use]
pub fn pipeline_link(view: ViewType, board: &Board, pipeline: &Pipeline) -> String {
    deal_link(view, &board.id, Some(&pipeline.id))
}

fn deal_link(view: ViewType, board_id: &str, pipeline_id: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("id", board_id);
    if let Some(pipeline_id) = pipeline_id {
        query.append_pair("pipelineId", pipeline_id);
    }
    format!("/deal/{}?{}", view.segment(), query.finish())
}

/// Link for the Board/Calendar toggle, keeping the current selection when
/// both board and pipeline are known.
#[must_use]
pub fn view_link(view: ViewType, board: Option<&Board>, pipeline: Option<&Pipeline>) -> String {
    match (board, pipeline) {
        (Some(board), Some(pipeline)) => pipeline_link(view, board, pipeline),
        _ => format!("/deal/{}", view.segment()),
    }
}
