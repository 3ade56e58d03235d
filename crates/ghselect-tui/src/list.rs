// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use ghselect_app::DisplayItem;

use crate::row::ROW_HEIGHT;

/// Size of the row area in terminal cells. Zero means "not known yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    Insert(char),
    Backspace,
    ClearQuery,
    FocusFilter,
    ResetFilter,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Resize(Viewport),
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStep {
    Continue,
    /// Index into the unfiltered items, or `None` when nothing matched.
    Confirmed(Option<usize>),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow<'a, T> {
    pub position: usize,
    pub item: &'a T,
    pub highlighted: bool,
}

/// Filterable, scrollable list state. `items` is never reordered; the
/// filter only rebuilds `matches`, which holds indices into `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterList<T> {
    items: Vec<T>,
    query: String,
    filtering: bool,
    matches: Vec<usize>,
    cursor: Option<usize>,
    offset: usize,
    viewport: Viewport,
    row_height: u16,
}

impl<T: DisplayItem> FilterList<T> {
    pub fn new(items: Vec<T>, viewport: Viewport) -> Self {
        let mut list = Self {
            items,
            query: String::new(),
            filtering: false,
            matches: Vec::new(),
            cursor: None,
            offset: 0,
            viewport,
            row_height: ROW_HEIGHT,
        };
        list.refilter();
        list
    }

    pub fn with_row_height(mut self, row_height: u16) -> Self {
        self.row_height = row_height.max(1);
        self.scroll_to_cursor();
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Cursor position within the filtered view.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn filtered_len(&self) -> usize {
        self.matches.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &T> + '_ {
        self.matches.iter().map(|index| &self.items[*index])
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected_index().map(|index| &self.items[index])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.cursor.and_then(|position| self.matches.get(position).copied())
    }

    /// Rows that fit in the viewport at the current row height.
    pub fn page_size(&self) -> usize {
        usize::from(self.viewport.height / self.row_height)
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow<'_, T>> {
        let end = self
            .offset
            .saturating_add(self.page_size())
            .min(self.matches.len());
        (self.offset..end)
            .map(|position| VisibleRow {
                position,
                item: &self.items[self.matches[position]],
                highlighted: self.cursor == Some(position),
            })
            .collect()
    }

    pub fn into_item(self, index: usize) -> Option<T> {
        self.items.into_iter().nth(index)
    }

    pub fn apply(&mut self, event: ListEvent) -> ListStep {
        match event {
            ListEvent::Insert(ch) => {
                self.query.push(ch);
                self.refilter();
            }
            ListEvent::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            ListEvent::ClearQuery => {
                self.query.clear();
                self.refilter();
            }
            ListEvent::FocusFilter => {
                self.filtering = true;
            }
            ListEvent::ResetFilter => {
                self.filtering = false;
                self.query.clear();
                self.refilter();
            }
            ListEvent::Up => self.move_cursor(-1),
            ListEvent::Down => self.move_cursor(1),
            ListEvent::PageUp => self.move_cursor(-self.page_step()),
            ListEvent::PageDown => self.move_cursor(self.page_step()),
            ListEvent::Home => {
                if self.cursor.is_some() {
                    self.cursor = Some(0);
                    self.scroll_to_cursor();
                }
            }
            ListEvent::End => {
                if self.cursor.is_some() {
                    self.cursor = Some(self.matches.len() - 1);
                    self.scroll_to_cursor();
                }
            }
            ListEvent::Resize(viewport) => {
                self.viewport = viewport;
                self.scroll_to_cursor();
            }
            ListEvent::Confirm => return ListStep::Confirmed(self.selected_index()),
            ListEvent::Cancel => return ListStep::Cancelled,
        }
        ListStep::Continue
    }

    fn page_step(&self) -> isize {
        self.page_size().max(1) as isize
    }

    fn refilter(&mut self) {
        let query = normalized_query(&self.query);
        self.matches = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches_query(item.filter_value(), &query))
            .map(|(index, _)| index)
            .collect();
        self.cursor = if self.matches.is_empty() {
            None
        } else {
            Some(0)
        };
        self.offset = 0;
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(current) = self.cursor else {
            return;
        };
        let last = self.matches.len().saturating_sub(1);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize)
        };
        self.cursor = Some(next.min(last));
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let page = self.page_size();
        if page == 0 {
            self.offset = 0;
            return;
        }
        self.offset = self.offset.min(self.matches.len().saturating_sub(page));
        let Some(cursor) = self.cursor else {
            return;
        };
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + page {
            self.offset = cursor + 1 - page;
        }
    }
}

fn normalized_query(query: &str) -> Vec<char> {
    query
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive subsequence match; an empty query matches everything.
fn matches_query(value: &str, needle: &[char]) -> bool {
    let mut needle = needle.iter().peekable();
    for ch in value.chars().flat_map(char::to_lowercase) {
        match needle.peek() {
            Some(target) if **target == ch => {
                needle.next();
            }
            Some(_) => {}
            None => return true,
        }
    }
    needle.peek().is_none()
}

#[cfg(test)]
mod tests {
    use super::{FilterList, ListEvent, ListStep, Viewport, matches_query, normalized_query};
    use ghselect_app::{ActionKind, DisplayItem, Repository};
    use ghselect_testkit::{RepoFaker, scenario_repositories};

    fn typed(list: &mut FilterList<Repository>, text: &str) {
        for ch in text.chars() {
            assert_eq!(list.apply(ListEvent::Insert(ch)), ListStep::Continue);
        }
    }

    fn names<'a>(list: &'a FilterList<Repository>) -> Vec<&'a str> {
        list.filtered().map(DisplayItem::title).collect()
    }

    fn matches(value: &str, query: &str) -> bool {
        matches_query(value, &normalized_query(query))
    }

    #[test]
    fn matcher_is_case_insensitive_subsequence() {
        assert!(matches("acme/web", ""));
        assert!(matches("acme/web", "web"));
        assert!(matches("acme/web", "WEB"));
        assert!(matches("acme/web", "amw"));
        assert!(matches("acme/web", "acme web"));
        assert!(!matches("acme/api", "web"));
        assert!(!matches("acme/web", "bew"));
    }

    #[test]
    fn new_list_selects_first_item() {
        let list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        assert_eq!(list.cursor(), Some(0));
        assert_eq!(list.filtered_len(), 2);
        assert_eq!(list.selected().map(DisplayItem::title), Some("acme/api"));
    }

    #[test]
    fn empty_list_has_no_cursor_and_confirms_nothing() {
        let mut list = FilterList::<Repository>::new(Vec::new(), Viewport::default());
        assert_eq!(list.cursor(), None);
        list.apply(ListEvent::Down);
        list.apply(ListEvent::End);
        assert_eq!(list.cursor(), None);
        assert_eq!(list.apply(ListEvent::Confirm), ListStep::Confirmed(None));
    }

    #[test]
    fn typing_filters_and_resets_cursor_to_first_match() {
        let mut list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        list.apply(ListEvent::Down);
        assert_eq!(list.cursor(), Some(1));

        list.apply(ListEvent::FocusFilter);
        typed(&mut list, "web");
        assert_eq!(names(&list), vec!["acme/web"]);
        assert_eq!(list.cursor(), Some(0));
        assert_eq!(list.selected_index(), Some(1));
    }

    #[test]
    fn filtered_view_preserves_original_order_and_items() {
        let repos = RepoFaker::new(9).repositories(120);
        let mut list = FilterList::new(repos.clone(), Viewport::new(80, 24));
        typed(&mut list, "ap");

        let expected = repos
            .iter()
            .filter(|repo| matches(&repo.name_with_owner, "ap"))
            .map(|repo| repo.name_with_owner.as_str())
            .collect::<Vec<_>>();
        assert!(!expected.is_empty());
        assert_eq!(names(&list), expected);
        assert_eq!(list.items(), repos.as_slice());
    }

    #[test]
    fn no_match_clears_cursor_and_backspace_restores_it() {
        let mut list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        typed(&mut list, "zzz");
        assert_eq!(list.filtered_len(), 0);
        assert_eq!(list.cursor(), None);
        assert_eq!(list.selected(), None);
        assert_eq!(list.apply(ListEvent::Confirm), ListStep::Confirmed(None));

        list.apply(ListEvent::Backspace);
        list.apply(ListEvent::Backspace);
        list.apply(ListEvent::Backspace);
        assert_eq!(list.query(), "");
        assert_eq!(list.filtered_len(), 2);
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn backspace_on_empty_query_keeps_cursor() {
        let mut list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        list.apply(ListEvent::Down);
        list.apply(ListEvent::Backspace);
        assert_eq!(list.cursor(), Some(1));
    }

    #[test]
    fn navigation_is_clamped_at_both_ends() {
        let mut list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        list.apply(ListEvent::Up);
        assert_eq!(list.cursor(), Some(0));
        list.apply(ListEvent::Down);
        list.apply(ListEvent::Down);
        list.apply(ListEvent::Down);
        assert_eq!(list.cursor(), Some(1));
        list.apply(ListEvent::PageDown);
        assert_eq!(list.cursor(), Some(1));
        list.apply(ListEvent::PageUp);
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn cursor_stays_in_bounds_for_any_event_sequence() {
        let events = [
            ListEvent::Down,
            ListEvent::PageDown,
            ListEvent::Insert('a'),
            ListEvent::End,
            ListEvent::Insert('q'),
            ListEvent::Up,
            ListEvent::Backspace,
            ListEvent::PageUp,
            ListEvent::Insert('x'),
            ListEvent::Insert('z'),
            ListEvent::Down,
            ListEvent::ClearQuery,
            ListEvent::End,
            ListEvent::Resize(Viewport::new(40, 4)),
            ListEvent::Home,
        ];
        let mut list = FilterList::new(RepoFaker::new(4).repositories(60), Viewport::new(80, 30));
        for (step, event) in events.iter().cycle().take(300).enumerate() {
            list.apply(*event);
            match list.cursor() {
                Some(cursor) => assert!(cursor < list.filtered_len(), "step {step}"),
                None => assert_eq!(list.filtered_len(), 0, "step {step}"),
            }
            let visible = list.visible_rows();
            assert!(visible.len() <= list.page_size(), "step {step}");
            if list.cursor().is_some() && list.page_size() > 0 {
                assert_eq!(
                    visible.iter().filter(|row| row.highlighted).count(),
                    1,
                    "step {step}"
                );
            }
        }
    }

    #[test]
    fn scrolling_follows_cursor() {
        let mut list = FilterList::new(RepoFaker::new(2).repositories(20), Viewport::new(80, 9));
        assert_eq!(list.page_size(), 3);

        for _ in 0..4 {
            list.apply(ListEvent::Down);
        }
        let positions = list
            .visible_rows()
            .iter()
            .map(|row| row.position)
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![2, 3, 4]);

        list.apply(ListEvent::Home);
        assert_eq!(list.visible_rows()[0].position, 0);

        list.apply(ListEvent::End);
        let last = list.visible_rows();
        assert_eq!(last.last().map(|row| row.position), Some(19));
        assert!(last.last().is_some_and(|row| row.highlighted));
    }

    #[test]
    fn page_moves_by_visible_rows() {
        let mut list = FilterList::new(RepoFaker::new(2).repositories(20), Viewport::new(80, 12));
        assert_eq!(list.page_size(), 4);
        list.apply(ListEvent::PageDown);
        assert_eq!(list.cursor(), Some(4));
        list.apply(ListEvent::PageDown);
        assert_eq!(list.cursor(), Some(8));
        list.apply(ListEvent::PageUp);
        assert_eq!(list.cursor(), Some(4));
    }

    #[test]
    fn single_line_rows_fit_more_per_page() {
        let list = FilterList::new(RepoFaker::new(2).repositories(20), Viewport::new(80, 9))
            .with_row_height(1);
        assert_eq!(list.page_size(), 9);
        assert_eq!(list.visible_rows().len(), 9);
    }

    #[test]
    fn resize_changes_layout_not_selection() {
        let mut list = FilterList::new(RepoFaker::new(2).repositories(20), Viewport::default());
        assert_eq!(list.page_size(), 0);
        assert!(list.visible_rows().is_empty());

        list.apply(ListEvent::Down);
        list.apply(ListEvent::Down);
        list.apply(ListEvent::Resize(Viewport::new(100, 6)));
        assert_eq!(list.cursor(), Some(2));
        assert_eq!(list.viewport(), Viewport::new(100, 6));
        let visible = list.visible_rows();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().any(|row| row.highlighted && row.position == 2));
    }

    #[test]
    fn reset_filter_clears_query_and_leaves_filter_mode() {
        let mut list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        list.apply(ListEvent::FocusFilter);
        typed(&mut list, "web");
        assert!(list.is_filtering());

        list.apply(ListEvent::ResetFilter);
        assert!(!list.is_filtering());
        assert_eq!(list.query(), "");
        assert_eq!(list.filtered_len(), 2);
    }

    #[test]
    fn confirm_and_cancel_terminate() {
        let mut list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        list.apply(ListEvent::Down);
        assert_eq!(list.apply(ListEvent::Confirm), ListStep::Confirmed(Some(1)));
        assert_eq!(list.apply(ListEvent::Cancel), ListStep::Cancelled);
    }

    #[test]
    fn action_list_filters_on_labels() {
        let mut list = FilterList::new(ActionKind::ALL.to_vec(), Viewport::new(80, 24));
        for ch in "copy".chars() {
            list.apply(ListEvent::Insert(ch));
        }
        let ids = list.filtered().map(|action| action.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["copy-name", "copy-url"]);
        assert_eq!(list.apply(ListEvent::Confirm), ListStep::Confirmed(Some(1)));
    }

    #[test]
    fn into_item_returns_original_record() {
        let list = FilterList::new(scenario_repositories(), Viewport::new(80, 24));
        let item = list.into_item(1);
        assert_eq!(item.map(|repo| repo.name_with_owner), Some("acme/web".to_owned()));
    }
}
