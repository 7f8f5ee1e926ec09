use contracts::domain::project::Project;
use contracts::shared::api::{ListQuery, Pagination};

use crate::shared::api_utils::{self, ApiError, ListPage};
use crate::shared::table_state::page_count;

const PATH: &str = "/api/projects";

/// Одна страница с сервера. Поиск и пагинацию делает сервер.
pub async fn fetch_projects(query: &ListQuery) -> Result<ListPage<Project>, ApiError> {
    api_utils::fetch_list(PATH, query).await
}

pub async fn fetch_project(id: &str) -> Result<Project, ApiError> {
    api_utils::fetch_one(PATH, id).await
}

pub async fn delete_project(id: &str) -> Result<(), ApiError> {
    api_utils::delete(PATH, id).await
}

/// Число строк по всем страницам. Без блока пагинации равно длине страницы.
pub fn total_rows<T>(page: &ListPage<T>) -> usize {
    page.pagination
        .as_ref()
        .map(|p| p.total as usize)
        .unwrap_or(page.rows.len())
}

/// Страница (с 0), на которой оказалась таблица после ответа. Берётся из
/// ответа сервера, без него остаётся запрошенной, и не выходит за последнюю.
pub fn settled_page<T>(page: &ListPage<T>, requested: usize, page_size: usize) -> usize {
    let last = page_count(total_rows(page), page_size) - 1;
    page.pagination
        .as_ref()
        .map(Pagination::page_index)
        .unwrap_or(requested)
        .min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(page: u32, total: u64) -> ListPage<u8> {
        ListPage {
            rows: vec![1],
            pagination: Some(Pagination {
                page,
                limit: 10,
                total,
                total_pages: total.div_ceil(10) as u32,
                has_next_page: false,
                has_previous_page: page > 1,
            }),
        }
    }

    #[test]
    fn test_settled_page_follows_server() {
        // Сервер вернул первую страницу вместо запрошенной третьей
        assert_eq!(settled_page(&paged(1, 41), 2, 10), 0);
        assert_eq!(settled_page(&paged(3, 41), 2, 10), 2);
    }

    #[test]
    fn test_settled_page_clamps_to_last_page() {
        assert_eq!(settled_page(&paged(5, 12), 4, 10), 1);

        let unpaged = ListPage {
            rows: vec![1, 2],
            pagination: None,
        };
        assert_eq!(settled_page(&unpaged, 3, 10), 0);
        assert_eq!(settled_page(&unpaged, 0, 10), 0);
    }

    #[test]
    fn test_total_rows_prefers_pagination() {
        let page = ListPage {
            rows: vec![1, 2, 3],
            pagination: Some(Pagination {
                page: 2,
                limit: 3,
                total: 41,
                total_pages: 14,
                has_next_page: true,
                has_previous_page: true,
            }),
        };
        assert_eq!(total_rows(&page), 41);

        let unpaged = ListPage {
            rows: vec![1, 2],
            pagination: None,
        };
        assert_eq!(total_rows(&unpaged), 2);
    }
}
