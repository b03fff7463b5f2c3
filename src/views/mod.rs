//! Vistas de tabla
//!
//! Estado en memoria de búsqueda, filtro y paginación. Nunca se persiste.

pub mod filters;
pub mod list_state;
pub mod pagination;
pub mod table_view;

pub use filters::{Searchable, StatusFilter};
pub use list_state::ListState;
pub use pagination::{PageSize, Pagination};
pub use table_view::TableView;
