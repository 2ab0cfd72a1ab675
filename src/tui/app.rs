use std::collections::HashSet;

use ratatui::widgets::ListState;

use crate::app::Home;
use crate::domain::{Article, ArticleSummary, Category, FeedFilter};
use crate::render::{links, PresentationNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Articles,
    Reader,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Articles => ActivePane::Reader,
            ActivePane::Reader => ActivePane::Articles,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

pub const PAGE_SIZE: usize = 10;

/// The article open in the reader pane.
pub struct OpenArticle {
    pub article: Article,
    pub nodes: Vec<PresentationNode>,
    /// Index into the article's links, once one has been selected.
    pub link_index: Option<usize>,
}

impl OpenArticle {
    pub fn new(article: Article, nodes: Vec<PresentationNode>) -> Self {
        Self {
            article,
            nodes,
            link_index: None,
        }
    }

    pub fn links(&self) -> Vec<&str> {
        links(&self.nodes)
    }

    /// The selected link, or the first one when none has been selected.
    pub fn selected_link(&self) -> Option<&str> {
        let links = self.links();
        links.get(self.link_index.unwrap_or(0)).copied()
    }
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub articles: Vec<ArticleSummary>,
    pub categories: Vec<Category>,
    pub filters: Vec<FeedFilter>,
    pub filter_index: usize,
    pub article_index: usize,
    pub reader: Option<OpenArticle>,
    pub reader_scroll: u16,
    /// Furthest the reader can scroll, set each time the reader is drawn.
    pub reader_max_scroll: u16,
    /// Session-only, never written anywhere.
    pub bookmarks: HashSet<String>,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub is_loading: bool,
    pub offline: bool,
    pub maximized: bool,
    pub article_list_state: ListState,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut article_list_state = ListState::default();
        article_list_state.select(Some(0));

        Self {
            active_pane: ActivePane::Articles,
            articles: Vec::new(),
            categories: Vec::new(),
            filters: FeedFilter::defaults(),
            filter_index: 0,
            article_index: 0,
            reader: None,
            reader_scroll: 0,
            reader_max_scroll: 0,
            bookmarks: HashSet::new(),
            should_quit: false,
            status_message: None,
            is_loading: false,
            offline: false,
            maximized: false,
            article_list_state,
        }
    }

    pub fn current_filter(&self) -> &FeedFilter {
        &self.filters[self.filter_index]
    }

    /// Replace the feed, keeping the selection in range.
    pub fn set_home(&mut self, home: Home) {
        self.articles = home.articles;
        self.set_categories(home.categories);

        if self.article_index >= self.articles.len() {
            self.article_index = self.articles.len().saturating_sub(1);
        }
        self.article_list_state.select(Some(self.article_index));
    }

    /// Default filters first, then every other known category.
    fn set_categories(&mut self, categories: Vec<Category>) {
        let current = self.current_filter().clone();

        let mut filters = FeedFilter::defaults();
        for category in &categories {
            let filter = FeedFilter::Category(category.title.clone());
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }

        self.filter_index = filters.iter().position(|f| *f == current).unwrap_or(0);
        self.filters = filters;
        self.categories = categories;
    }

    /// Advance to the next filter and return it.
    pub fn next_filter(&mut self) -> FeedFilter {
        self.filter_index = (self.filter_index + 1) % self.filters.len();
        self.article_index = 0;
        self.article_list_state.select(Some(0));
        self.current_filter().clone()
    }

    pub fn selected_article(&self) -> Option<&ArticleSummary> {
        self.articles.get(self.article_index)
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.contains(id)
    }

    /// Toggle the bookmark on the selected or open article. Returns the new
    /// state, or `None` when there is nothing to bookmark.
    pub fn toggle_bookmark(&mut self) -> Option<bool> {
        let id = match self.active_pane {
            ActivePane::Reader => self.reader.as_ref().map(|r| r.article.id.clone()),
            ActivePane::Articles => self.selected_article().map(|a| a.id.clone()),
        }?;

        if self.bookmarks.remove(&id) {
            Some(false)
        } else {
            self.bookmarks.insert(id);
            Some(true)
        }
    }

    pub fn open_article(&mut self, article: Article, nodes: Vec<PresentationNode>) {
        self.reader = Some(OpenArticle::new(article, nodes));
        self.reader_scroll = 0;
        self.active_pane = ActivePane::Reader;
    }

    pub fn close_article(&mut self) {
        self.reader = None;
        self.reader_scroll = 0;
        self.maximized = false;
        self.active_pane = ActivePane::Articles;
    }

    /// Select the next link in the open article, wrapping around.
    pub fn next_link(&mut self) -> Option<String> {
        let reader = self.reader.as_mut()?;
        let count = reader.links().len();
        if count == 0 {
            return None;
        }

        let next = reader.link_index.map(|i| (i + 1) % count).unwrap_or(0);
        reader.link_index = Some(next);
        reader.selected_link().map(str::to_string)
    }

    /// Share text of the open article, flattened to one status line.
    pub fn share_message(&self) -> Option<String> {
        let reader = self.reader.as_ref()?;
        Some(reader.article.share_message().replace("\n\n", " · "))
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if self.article_index > 0 {
                    self.article_index -= 1;
                    self.article_list_state.select(Some(self.article_index));
                }
            }
            ActivePane::Reader => {
                self.reader_scroll = self.reader_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if self.article_index + 1 < self.articles.len() {
                    self.article_index += 1;
                    self.article_list_state.select(Some(self.article_index));
                }
            }
            ActivePane::Reader => {
                self.reader_scroll = self
                    .reader_scroll
                    .saturating_add(1)
                    .min(self.reader_max_scroll);
            }
        }
    }

    pub fn next_page(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                let max_index = self.articles.len().saturating_sub(1);
                self.article_index = (self.article_index + PAGE_SIZE).min(max_index);
                self.article_list_state.select(Some(self.article_index));
            }
            ActivePane::Reader => {
                self.reader_scroll = self
                    .reader_scroll
                    .saturating_add(PAGE_SIZE as u16)
                    .min(self.reader_max_scroll);
            }
        }
    }

    pub fn prev_page(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                self.article_index = self.article_index.saturating_sub(PAGE_SIZE);
                self.article_list_state.select(Some(self.article_index));
            }
            ActivePane::Reader => {
                self.reader_scroll = self.reader_scroll.saturating_sub(PAGE_SIZE as u16);
            }
        }
    }

    /// Record how far the reader can scroll and pull the offset back in range.
    pub fn set_reader_max_scroll(&mut self, max: u16) {
        self.reader_max_scroll = max;
        self.reader_scroll = self.reader_scroll.min(max);
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
        if self.maximized {
            self.active_pane = ActivePane::Reader;
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
