//! Paginación del lado del cliente
//!
//! Pagina sobre el conjunto ya filtrado. Cambiar el tamaño de página vuelve a
//! la página 1.

use std::fmt;

/// Tamaños de página permitidos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    Five,
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::Five, PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    pub fn value(&self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Ten
    }
}

impl TryFrom<usize> for PageSize {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .iter()
            .copied()
            .find(|size| size.value() == value)
            .ok_or(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Botones de página visibles como máximo
const PAGE_WINDOW: usize = 5;

/// Estado de paginación (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: PageSize,
}

impl Pagination {
    pub fn new(page_size: PageSize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// ceil(total / page_size)
    pub fn page_count(&self, total: usize) -> usize {
        let size = self.page_size.value();
        (total + size - 1) / size
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Ir a una página existente; fuera de rango no cambia nada
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        if page == 0 || page > self.page_count(total).max(1) {
            return false;
        }
        self.page = page;
        true
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page < self.page_count(total)
    }

    pub fn next(&mut self, total: usize) -> bool {
        if !self.has_next(total) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Si la página actual quedó fuera de rango, volver a la 1
    pub fn reconcile(&mut self, total: usize) {
        if self.page > self.page_count(total).max(1) {
            self.page = 1;
        }
    }

    /// Rango [start, end) de la página actual dentro de `total`
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.page_size.value()).min(total);
        let end = (start + self.page_size.value()).min(total);
        (start, end)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.bounds(items.len());
        &items[start..end]
    }

    /// "Showing X to Y": posiciones 1-based inclusivas, (0, 0) si no hay filas
    pub fn showing_range(&self, total: usize) -> (usize, usize) {
        let (start, end) = self.bounds(total);
        if start == end {
            return (0, 0);
        }
        (start + 1, end)
    }

    /// Números de página visibles, hasta cinco, centrados en la página actual
    pub fn page_window(&self, total: usize) -> Vec<usize> {
        let pages = self.page_count(total);
        let visible = pages.min(PAGE_WINDOW);
        let first = if pages <= PAGE_WINDOW || self.page <= 3 {
            1
        } else if self.page + 2 >= pages {
            pages - (PAGE_WINDOW - 1)
        } else {
            self.page - 2
        };
        (first..first + visible).collect()
    }

    /// Hay páginas ocultas después de la ventana
    pub fn has_trailing_gap(&self, total: usize) -> bool {
        let pages = self.page_count(total);
        pages > PAGE_WINDOW && self.page + 2 < pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_ceiling() {
        for size in PageSize::ALL {
            let pagination = Pagination::new(size);
            for total in 0..=120usize {
                let expected = (total as f64 / size.value() as f64).ceil() as usize;
                assert_eq!(pagination.page_count(total), expected, "total={total} size={size}");
            }
        }
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut pagination = Pagination::new(PageSize::Five);
        assert!(pagination.go_to(3, 40));
        for size in PageSize::ALL {
            pagination.go_to(2, 200);
            pagination.set_page_size(size);
            assert_eq!(pagination.page(), 1);
        }
    }

    #[test]
    fn test_slices_twelve_items() {
        let items: Vec<u32> = (1..=12).collect();
        let mut pagination = Pagination::new(PageSize::Ten);

        assert_eq!(pagination.slice(&items), &items[0..10]);
        assert_eq!(pagination.showing_range(items.len()), (1, 10));

        assert!(pagination.next(items.len()));
        assert_eq!(pagination.slice(&items), &[11, 12]);
        assert_eq!(pagination.showing_range(items.len()), (11, 12));
        assert!(!pagination.next(items.len()));
    }

    #[test]
    fn test_reconcile_resets_out_of_range_page() {
        let mut pagination = Pagination::new(PageSize::Five);
        pagination.go_to(4, 20);
        pagination.reconcile(12);
        assert_eq!(pagination.page(), 1);

        pagination.go_to(2, 12);
        pagination.reconcile(8);
        assert_eq!(pagination.page(), 2);

        pagination.reconcile(0);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut pagination = Pagination::new(PageSize::Ten);
        assert!(!pagination.go_to(0, 30));
        assert!(!pagination.go_to(4, 30));
        assert!(pagination.go_to(3, 30));
        assert_eq!(pagination.page(), 3);
        assert!(pagination.go_to(1, 0));
    }

    #[test]
    fn test_page_window_slides() {
        let mut pagination = Pagination::new(PageSize::Five);
        let total = 50; // 10 páginas

        assert_eq!(pagination.page_window(total), vec![1, 2, 3, 4, 5]);
        assert!(pagination.has_trailing_gap(total));

        pagination.go_to(6, total);
        assert_eq!(pagination.page_window(total), vec![4, 5, 6, 7, 8]);

        pagination.go_to(9, total);
        assert_eq!(pagination.page_window(total), vec![6, 7, 8, 9, 10]);
        assert!(!pagination.has_trailing_gap(total));

        assert_eq!(pagination.page_window(12), vec![1, 2, 3]);
        assert!(pagination.page_window(0).is_empty());
    }

    #[test]
    fn test_showing_range_empty() {
        let pagination = Pagination::default();
        assert_eq!(pagination.showing_range(0), (0, 0));
    }
}
