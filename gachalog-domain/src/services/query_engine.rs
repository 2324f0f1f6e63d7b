use crate::entities::{GachaItem, GachaLogFilter, HistoryRecord};

#[derive(Debug)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a GachaItem>,
    pub total: usize,
}

/// Filters one banner of `record`, newest first, and cuts out the requested page.
///
/// Total over any input: an unknown banner, `page == 0`, `size == 0` or a page
/// past the end all produce an empty page. `total` always counts every
/// filtered item regardless of the window.
pub fn query<'a>(record: &'a HistoryRecord, filter: &GachaLogFilter) -> QueryPage<'a> {
    let needle = filter
        .name_contains
        .as_deref()
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase);

    let filtered: Vec<&GachaItem> = record
        .items(&filter.banner_type)
        .iter()
        .rev()
        .filter(|item| filter.rarities.is_empty() || filter.rarities.contains(&item.rank_type))
        .filter(|item| {
            needle
                .as_deref()
                .map(|needle| item.name.to_lowercase().contains(needle))
                .unwrap_or(true)
        })
        .collect();

    let total = filtered.len();
    if filter.page == 0 || filter.size == 0 {
        return QueryPage { items: Vec::new(), total };
    }
    let start = (filter.page - 1).saturating_mul(filter.size);
    let items = filtered.into_iter().skip(start).take(filter.size).collect();
    QueryPage { items, total }
}

pub fn max_page(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

pub fn find_item<'a>(
    record: &'a HistoryRecord,
    banner_type: &str,
    id: &str,
) -> Option<&'a GachaItem> {
    record.items(banner_type).iter().find(|item| item.id == id)
}
