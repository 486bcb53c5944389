//! File browser overlay state

use std::path::{Path, PathBuf};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::workflows::MediaKind;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff"];

/// What the picked file is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseTarget {
    Upload,
    Media(MediaKind),
}

impl BrowseTarget {
    pub fn title(&self) -> &'static str {
        match self {
            BrowseTarget::Upload => "Upload Study Material",
            BrowseTarget::Media(kind) => kind.empty_prompt(),
        }
    }

    /// Whether a (non-directory) path is offered for this target
    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            BrowseTarget::Upload => true,
            BrowseTarget::Media(_) => is_image_path(path),
        }
    }
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub struct FileBrowser {
    open: bool,
    target: BrowseTarget,
    current_dir: PathBuf,
    /// Parent directory (if any) first, then directories, then files
    items: Vec<PathBuf>,
    has_parent: bool,
    selected: usize,
    search: String,
}

impl FileBrowser {
    pub fn new(current_dir: PathBuf) -> Self {
        Self {
            open: false,
            target: BrowseTarget::Upload,
            current_dir,
            items: Vec::new(),
            has_parent: false,
            selected: 0,
            search: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn target(&self) -> BrowseTarget {
        self.target
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn open(&mut self, target: BrowseTarget) {
        self.open = true;
        self.target = target;
        self.search.clear();
        self.load_items();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.items.clear();
        self.selected = 0;
        self.search.clear();
    }

    pub fn load_items(&mut self) {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(&self.current_dir) {
            Ok(entries) => entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_dir() || self.target.accepts(path))
                .collect(),
            Err(e) => {
                tracing::warn!(dir = %self.current_dir.display(), error = %e, "cannot list directory");
                Vec::new()
            }
        };

        // Directories first, then files
        entries.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.file_name().cmp(&b.file_name()),
        });

        self.items.clear();
        self.has_parent = false;
        if let Some(parent) = self.current_dir.parent() {
            self.items.push(parent.to_path_buf());
            self.has_parent = true;
        }
        self.items.extend(entries);
        self.selected = 0;
    }

    /// Items after fuzzy filtering, paired with whether each is the parent
    /// directory entry
    pub fn visible_items(&self) -> Vec<(&PathBuf, bool)> {
        if self.search.is_empty() {
            return self
                .items
                .iter()
                .enumerate()
                .map(|(i, path)| (path, self.has_parent && i == 0))
                .collect();
        }

        let matcher = SkimMatcherV2::default();
        let skip = usize::from(self.has_parent);
        self.items
            .iter()
            .skip(skip)
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|name| matcher.fuzzy_match(name, &self.search))
                    .is_some()
            })
            .map(|path| (path, false))
            .collect()
    }

    pub fn next(&mut self) {
        let count = self.visible_items().len();
        if self.selected < count.saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    /// Remove the last search character; with an empty search go up one
    /// directory instead
    pub fn pop_search(&mut self) {
        if self.search.pop().is_some() {
            self.selected = 0;
        } else if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.load_items();
        }
    }

    /// Enter the highlighted directory, or pick the highlighted file. A
    /// picked file closes the browser and is returned.
    pub fn select(&mut self) -> Option<PathBuf> {
        let path = self.visible_items().get(self.selected).map(|(p, _)| (*p).clone())?;
        if path.is_dir() {
            self.current_dir = path;
            self.search.clear();
            self.load_items();
            None
        } else {
            self.close();
            Some(path)
        }
    }
}
