use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total: i64,
    pub total_pages: i64,
    pub first: bool,
    pub last: bool,
    pub visible: usize,
}

impl<T> Page<T> {
    /// `page` is 1-based.
    pub fn new(items: Vec<T>, page: u32, size: u32, total: i64) -> Self {
        let total_pages = match size {
            0 => 0,
            size => (total + size as i64 - 1) / size as i64,
        };
        let visible = items.len();

        Self {
            items,
            page,
            size,
            total,
            total_pages,
            first: page <= 1,
            last: page as i64 >= total_pages,
            visible,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            visible: self.visible,
        }
    }
}
