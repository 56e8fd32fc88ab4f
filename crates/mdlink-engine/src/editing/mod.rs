/*!
 * # Link Editing
 *
 * Decisions an editor makes when the user invokes the link command or moves
 * the cursor next to a link. Everything here is a pure function of one line
 * of text plus a little boundary metadata; the host editor owns the
 * document, the clipboard and the edit form.
 *
 * ## Flow
 *
 * 1. **`operation`**: edit the link under the cursor, or synthesize a new one
 * 2. **`synthesize`**: ordered rules turning selection / URL / clipboard into a link
 * 3. **`validate`**: destination checks shown while the form is open
 * 4. `LinkOperation::apply` renders the committed link back into the line
 * 5. **`skip`**: where the cursor lands when it leaves the link
 *
 * **`conceal`** reports which chars to hide for a preview-style rendering,
 * and **`document`** adapts all of the above to a whole xi-rope buffer.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use mdlink_engine::editing::*;
 *
 * let line = "see [docs](a.md) here";
 * let op = determine_link_operation(&EditorState {
 *     line,
 *     cursor_ch: 6,
 *     selection: "",
 *     clipboard_text: "",
 * });
 * assert!(!op.is_new_link);
 *
 * let toggled = op.link.toggle_format().unwrap();
 * let applied = op.apply(line, &toggled).unwrap();
 * assert_eq!(applied.line, "see [[a.md|docs]] here");
 * ```
 */

pub mod conceal;
pub mod document;
pub mod operation;
pub mod skip;
pub mod synthesize;
pub mod validate;

pub use conceal::{ConcealedLink, conceal_ranges};
pub use document::TextDocument;
pub use operation::{AppliedEdit, EditorState, LinkOperation, determine_link_operation};
pub use skip::{
    CloseContext, Position, SkipContext, SkipLinkResult, determine_close_position, determine_skip_position,
};
pub use synthesize::{LinkContext, NewLink, determine_link_from_context};
pub use validate::{MAX_DESTINATION_LENGTH, Severity, ValidationReport, ValidationWarning, validate_link_destination};
