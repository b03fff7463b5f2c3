//! Tabla con búsqueda, filtro por estado y paginación
//!
//! El orden de las filas es el del backend. La paginación corre sobre el
//! conjunto filtrado.

use super::filters::{matches_search, Searchable, StatusFilter};
use super::pagination::{PageSize, Pagination};

#[derive(Debug, Clone)]
pub struct TableView<T> {
    items: Vec<T>,
    search: String,
    status_filter: StatusFilter,
    pagination: Pagination,
}

impl<T: Searchable> TableView<T> {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            status_filter: StatusFilter::All,
            pagination: Pagination::new(page_size),
        }
    }

    pub fn with_items(items: Vec<T>, page_size: PageSize) -> Self {
        let mut view = Self::new(page_size);
        view.items = items;
        view
    }

    /// Reemplazar las filas tras un refetch.
    ///
    /// Si cambia la cantidad de filas visibles, o la página actual deja de
    /// existir, se vuelve a la página 1.
    pub fn replace_items(&mut self, items: Vec<T>) {
        let previous = self.filtered_len();
        self.items = items;
        let current = self.filtered_len();
        if current != previous {
            self.pagination.reset();
        } else {
            self.pagination.reconcile(current);
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.pagination.reset();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.pagination.reset();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.pagination.set_page_size(page_size);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.filtered_len();
        self.pagination.go_to(page, total)
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.filtered_len();
        self.pagination.next(total)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status_filter(&self) -> &StatusFilter {
        &self.status_filter
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> PageSize {
        self.pagination.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.filtered_len())
    }

    pub fn page_window(&self) -> Vec<usize> {
        self.pagination.page_window(self.filtered_len())
    }

    pub fn has_trailing_gap(&self) -> bool {
        self.pagination.has_trailing_gap(self.filtered_len())
    }

    /// Filas que pasan búsqueda y filtro, en orden del backend
    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| self.status_filter.accepts(*item) && matches_search(*item, &self.search))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Filas de la página actual
    pub fn page_items(&self) -> Vec<&T> {
        let filtered = self.filtered();
        self.pagination.slice(&filtered).to_vec()
    }

    /// "Showing 11 to 12 of 12 entries"
    pub fn showing_entries(&self) -> String {
        let total = self.filtered_len();
        let (from, to) = self.pagination.showing_range(total);
        format!("Showing {} to {} of {} entries", from, to, total)
    }

    /// "Showing 3 of 8 items"
    pub fn showing_items(&self) -> String {
        format!("Showing {} of {} items", self.filtered_len(), self.items.len())
    }

    /// Sin ninguna fila cargada (distinto de "sin coincidencias")
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
