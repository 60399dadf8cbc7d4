//! Line-level matchers
//!
//! Pure recognizers over a single paragraph or line of text: run
//! formatting, table order, list numbering, list relationships and
//! heading/noise markers.

pub mod formatting;
pub mod heading;
pub mod list;
pub mod numbering;
pub(crate) mod table;

pub use formatting::{
    ParagraphText, first_line_indent_width, is_bold, is_first_line_indented, remove_strikethrough_text,
};
pub use heading::{
    EnclosureNum, EnclosureReturnType, NoiseFilter, enclosure_number, is_enclosure_continuation,
    is_enclosure_title, is_glossary_continuation, is_glossary_start, is_toc, is_toc_start,
    match_enclosure_num, match_section_num, should_skip,
};
pub use list::{is_alpha_list_item, is_list_child, is_next_num_list_item};
pub use numbering::{
    ListMarker, alpha_list_letter, list_marker, match_num_dot, match_num_list_item,
    match_num_parentheses, match_roman_numerals, next_letter, outline_number, roman_to_int,
};
