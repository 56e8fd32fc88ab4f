//! UniFFI bindings for host editor integrations
//!
//! Exposes the link engine's decisions to a Kotlin/Swift/JS host. The host
//! owns the document, clipboard and edit form; every call here is a pure
//! function of the values passed in. Offsets are char counts and cross the
//! boundary as `u32`.

use mdlink_engine::{
    AppliedEdit, CloseContext, EditorState, LinkInfo, LinkOperation, LinkSpan, ParsedQuery,
    Position, Severity, SkipContext, SkipLinkResult, ValidationReport, ValidationWarning,
    determine_close_position, determine_link_operation, determine_skip_position, markdown_to_wiki,
    parse_query, validate_link_destination, wiki_to_markdown,
};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Invalid link: {reason}")]
    InvalidLink { reason: String },
    #[error("Invalid span: start {start} is after end {end}")]
    InvalidSpan { start: u32, end: u32 },
}

impl From<mdlink_engine::LinkError> for FfiError {
    fn from(e: mdlink_engine::LinkError) -> Self {
        FfiError::InvalidLink {
            reason: e.to_string(),
        }
    }
}

fn span(start: u32, end: u32) -> Result<LinkSpan, FfiError> {
    if start > end {
        return Err(FfiError::InvalidSpan { start, end });
    }
    Ok(LinkSpan::new(start as usize, end as usize))
}

// ============ DTOs ============

/// A link in either notation.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct LinkDto {
    pub text: String,
    pub destination: String,
    pub is_wiki: bool,
    pub is_embed: bool,
}

impl LinkDto {
    fn from_engine(link: LinkInfo) -> Self {
        Self {
            text: link.text,
            destination: link.destination,
            is_wiki: link.is_wiki,
            is_embed: link.is_embed,
        }
    }

    fn into_engine(self) -> LinkInfo {
        LinkInfo {
            text: self.text,
            destination: self.destination,
            is_wiki: self.is_wiki,
            is_embed: self.is_embed,
        }
    }
}

/// What the link command should do, decided before the edit form opens.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct LinkOperationDto {
    pub link: LinkDto,
    /// Span to replace (char offsets, end exclusive)
    pub start: u32,
    pub end: u32,
    pub entered_from_left: bool,
    pub is_new_link: bool,
    /// Pre-select the text field
    pub should_select_text: bool,
    /// Shown to the user when a URL was rewritten
    pub conversion_notice: Option<String>,
}

impl LinkOperationDto {
    fn from_engine(op: LinkOperation) -> Self {
        Self {
            link: LinkDto::from_engine(op.link),
            start: op.span.start as u32,
            end: op.span.end as u32,
            entered_from_left: op.entered_from_left,
            is_new_link: op.is_new_link,
            should_select_text: op.should_select_text,
            conversion_notice: op.conversion_notice,
        }
    }

    fn into_engine(self) -> Result<LinkOperation, FfiError> {
        Ok(LinkOperation {
            span: span(self.start, self.end)?,
            link: self.link.into_engine(),
            entered_from_left: self.entered_from_left,
            is_new_link: self.is_new_link,
            should_select_text: self.should_select_text,
            conversion_notice: self.conversion_notice,
        })
    }
}

/// The line after a committed edit, and the new link's span in it.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct AppliedEditDto {
    pub line: String,
    pub start: u32,
    pub end: u32,
    pub entered_from_left: bool,
}

impl AppliedEditDto {
    fn from_engine(edit: AppliedEdit) -> Self {
        Self {
            line: edit.line,
            start: edit.span.start as u32,
            end: edit.span.end as u32,
            entered_from_left: edit.entered_from_left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct PositionDto {
    pub line: u32,
    pub ch: u32,
}

impl PositionDto {
    fn from_engine(position: Position) -> Self {
        Self {
            line: position.line as u32,
            ch: position.ch as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct SkipResultDto {
    pub position: PositionDto,
    pub skipped: bool,
}

impl SkipResultDto {
    fn from_engine(result: SkipLinkResult) -> Self {
        Self {
            position: PositionDto::from_engine(result.position),
            skipped: result.skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ValidationWarningDto {
    /// "error" or "caution"
    pub severity: String,
    pub message: String,
}

impl ValidationWarningDto {
    fn from_engine(warning: ValidationWarning) -> Self {
        let severity = match warning.severity {
            Severity::Error => "error",
            Severity::Caution => "caution",
        };
        Self {
            severity: severity.to_string(),
            message: warning.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ValidationReportDto {
    pub is_valid: bool,
    pub warnings: Vec<ValidationWarningDto>,
    pub should_highlight_dest: bool,
    pub should_highlight_text: bool,
}

impl ValidationReportDto {
    fn from_engine(report: ValidationReport) -> Self {
        Self {
            is_valid: report.is_valid,
            warnings: report
                .warnings
                .into_iter()
                .map(ValidationWarningDto::from_engine)
                .collect(),
            should_highlight_dest: report.should_highlight_dest,
            should_highlight_text: report.should_highlight_text,
        }
    }
}

/// Classified suggester input.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct SuggestionQueryDto {
    /// One of "file", "file_heading", "file_block", "global_heading",
    /// "current_file_heading", "current_file_block", "block_no_hash",
    /// "file_block_no_hash"
    pub kind: String,
    pub file: Option<String>,
    pub search: Option<String>,
    pub targets_block: bool,
}

impl SuggestionQueryDto {
    fn from_engine(query: ParsedQuery) -> Self {
        let kind = match query {
            ParsedQuery::File { .. } => "file",
            ParsedQuery::FileHeading { .. } => "file_heading",
            ParsedQuery::FileBlock { .. } => "file_block",
            ParsedQuery::GlobalHeading { .. } => "global_heading",
            ParsedQuery::CurrentFileHeading { .. } => "current_file_heading",
            ParsedQuery::CurrentFileBlock { .. } => "current_file_block",
            ParsedQuery::BlockNoHash { .. } => "block_no_hash",
            ParsedQuery::FileBlockNoHash { .. } => "file_block_no_hash",
        };
        Self {
            kind: kind.to_string(),
            file: query.file().map(str::to_string),
            search: query.search().map(str::to_string),
            targets_block: query.targets_block(),
        }
    }
}

// ============ Standalone Functions ============

/// Decide whether the link command edits the link under the cursor or
/// creates a new one. Pass the selection start as `cursor_ch` when text is
/// selected, and `""` for a clipboard that could not be read.
#[uniffi::export]
pub fn determine_operation(
    line: String,
    cursor_ch: u32,
    selection: String,
    clipboard_text: String,
) -> LinkOperationDto {
    LinkOperationDto::from_engine(determine_link_operation(&EditorState {
        line: &line,
        cursor_ch: cursor_ch as usize,
        selection: &selection,
        clipboard_text: &clipboard_text,
    }))
}

/// Write the edited link over the operation's span.
#[uniffi::export]
pub fn apply_operation(line: String, operation: LinkOperationDto, edited: LinkDto) -> Result<AppliedEditDto, FfiError> {
    let applied = operation
        .into_engine()?
        .apply(&line, &edited.into_engine())?;
    Ok(AppliedEditDto::from_engine(applied))
}

#[uniffi::export]
pub fn skip_position(
    line_text: String,
    cursor_line: u32,
    cursor_ch: u32,
    line_count: u32,
    prev_line_length: u32,
) -> SkipResultDto {
    SkipResultDto::from_engine(determine_skip_position(&SkipContext {
        cursor_line: cursor_line as usize,
        cursor_ch: cursor_ch as usize,
        line_text: &line_text,
        line_count: line_count as usize,
        prev_line_length: prev_line_length as usize,
    }))
}

#[uniffi::export]
pub fn close_position(
    line_text: String,
    cursor_line: u32,
    start: u32,
    end: u32,
    entered_from_left: bool,
    line_count: u32,
    prev_line_length: u32,
) -> Result<PositionDto, FfiError> {
    let position = determine_close_position(&CloseContext {
        cursor_line: cursor_line as usize,
        link_span: span(start, end)?,
        entered_from_left,
        line_text: &line_text,
        line_count: line_count as usize,
        prev_line_length: prev_line_length as usize,
    });
    Ok(PositionDto::from_engine(position))
}

#[uniffi::export]
pub fn to_markdown_destination(destination: String) -> String {
    wiki_to_markdown(&destination)
}

/// Returns `None` when the destination is a URL, which wiki links cannot hold.
#[uniffi::export]
pub fn to_wiki_destination(destination: String) -> Option<String> {
    markdown_to_wiki(&destination).into_option()
}

#[uniffi::export]
pub fn validate_destination(destination: String, text: String, is_wiki: bool) -> ValidationReportDto {
    ValidationReportDto::from_engine(validate_link_destination(&destination, &text, is_wiki))
}

#[uniffi::export]
pub fn parse_suggestion_query(input: String) -> SuggestionQueryDto {
    SuggestionQueryDto::from_engine(parse_query(&input))
}

/// Render a link as document text, refusing an empty destination.
#[uniffi::export]
pub fn render_link(link: LinkDto) -> Result<String, FfiError> {
    Ok(link.into_engine().committed()?.to_syntax())
}

/// Switch a link between wiki and markdown notation.
#[uniffi::export]
pub fn toggle_link_format(link: LinkDto) -> Result<LinkDto, FfiError> {
    Ok(LinkDto::from_engine(link.into_engine().toggle_format()?))
}
