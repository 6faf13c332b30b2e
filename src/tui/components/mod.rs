//! # TUI Components
//!
//! Stateless display components. Each one receives everything it draws as
//! props (struct fields borrowed from `App`) and is rebuilt every frame.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (app name, screen, account summary)
//! ├── banner.rs         (logo above prompt screens)
//! ├── input_field.rs    (single-line prompt with cursor)
//! ├── select_list.rs    (menu, results and history lists)
//! └── detail_card.rs    (one person record)
//! ```
//!
//! Cursor positions, list indices and paging all live in `App`, so none of
//! these components handle events.

mod banner;
mod detail_card;
mod input_field;
mod select_list;
mod title_bar;

pub use banner::Banner;
pub use detail_card::DetailCard;
pub use input_field::{INPUT_HEIGHT, InputField};
pub use select_list::SelectList;
pub use title_bar::TitleBar;
