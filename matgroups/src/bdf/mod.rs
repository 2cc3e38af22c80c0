//! # Bulk-data set documents
//!
//! Hypermesh `.bdf` files define groups as `SET` cards in the case control
//! section, each followed by a `$HMSET` comment line naming the group:
//!
//! ```text
//! CEND
//! SET    1 = 1 THRU 4,10 THRU 12,17,18,20
//! $HMSET        1        2 "SET_A"
//! SET    2 = 2,4,6,8,10,12,14,16,
//! 18,20
//! $HMSET        2        2 "SET_B"
//! BEGIN BULK
//! ENDDATA
//! ```
//!
//! Set ids count up from 1 in set name order, so the same sets always give a
//! byte-identical file. Set names are written between double quotes as-is;
//! a name containing `"` produces a line the importer cannot read.

mod token;
mod writer;

pub use token::parse_entries;
pub use token::tokens;
pub use token::Token;
pub use token::THRU;

pub use writer::render;
pub use writer::write_document;
pub use writer::BdfWriter;
pub use writer::BEGIN_BULK;
pub use writer::END_DATA;
pub use writer::ENTRIES_PER_LINE;
pub use writer::HEADER;
