//! Incremental (paged) row materialization.
//!
//! Rows are built one page at a time. After a page is attached, a one-shot
//! [`VisibilityTrigger`] is registered on its last row; only when the surface
//! reports that row as exposed is the next page built. Every [`reset`]
//! starts a new render pass, and triggers from older passes are ignored, so
//! an abandoned trigger can never advance the cursor of the current pass.
//!
//! ```ignore
//! let mut renderer = IncrementalRenderer::new(PAGE_SIZE);
//! renderer.reset(products.len());
//! renderer.materialize_next(|i| build_row(&products[i]));
//!
//! // later, when the surface reports the row exposed
//! if let Some(trigger) = renderer.pending_trigger() {
//!     renderer.notify_visible(trigger, |i| build_row(&products[i]));
//! }
//! ```
//!
//! [`reset`]: IncrementalRenderer::reset

use std::ops::Range;

/// Rows materialized per page.
pub const PAGE_SIZE: usize = 25;

/// Identifies one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PassId(u64);

/// One-shot "row became visible" registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibilityTrigger {
    /// Render pass the trigger belongs to
    pub pass: PassId,
    /// Collection index of the observed row
    pub row: usize,
}

/// Paged materializer for rows of type `R`.
#[derive(Debug)]
pub struct IncrementalRenderer<R> {
    page_size: usize,
    pass: PassId,
    total: usize,
    rows: Vec<R>,
    pending: Option<VisibilityTrigger>,
    pages: usize,
}

impl<R> IncrementalRenderer<R> {
    /// Create a renderer with the given page size (at least 1).
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            pass: PassId::default(),
            total: 0,
            rows: Vec::new(),
            pending: None,
            pages: 0,
        }
    }

    /// Start a new render pass over a collection of `total` items.
    ///
    /// Discards every materialized row and any pending trigger.
    pub fn reset(&mut self, total: usize) {
        self.pass = PassId(self.pass.0 + 1);
        self.total = total;
        self.rows.clear();
        self.pending = None;
        self.pages = 0;
        tracing::debug!(pass = self.pass.0, total, "Render pass started");
    }

    /// Materialize the next page and return its index range.
    ///
    /// Registers a trigger on the page's last row when items remain. Returns
    /// an empty range once the collection is exhausted.
    pub fn materialize_next(&mut self, build: impl FnMut(usize) -> R) -> Range<usize> {
        let start = self.rows.len();
        if start >= self.total {
            self.pending = None;
            return start..start;
        }
        let end = (start + self.page_size).min(self.total);
        self.rows.extend((start..end).map(build));
        self.pages += 1;

        self.pending = (end < self.total).then_some(VisibilityTrigger {
            pass: self.pass,
            row: end - 1,
        });
        tracing::debug!(
            pass = self.pass.0,
            page = self.pages,
            start,
            end,
            "Materialized page"
        );
        start..end
    }

    /// Fire a visibility trigger.
    ///
    /// Only the currently pending trigger of the current pass advances the
    /// cursor; stale or repeated triggers return `None`.
    pub fn notify_visible(
        &mut self,
        trigger: VisibilityTrigger,
        build: impl FnMut(usize) -> R,
    ) -> Option<Range<usize>> {
        if self.pending != Some(trigger) {
            tracing::trace!(?trigger, "Ignoring stale visibility trigger");
            return None;
        }
        self.pending = None;
        Some(self.materialize_next(build))
    }

    /// Fire the pending trigger if `visible` contains its row.
    pub fn notify_range_visible(
        &mut self,
        visible: Range<usize>,
        build: impl FnMut(usize) -> R,
    ) -> Option<Range<usize>> {
        let trigger = self.pending.filter(|t| visible.contains(&t.row))?;
        self.notify_visible(trigger, build)
    }

    #[must_use]
    pub const fn pending_trigger(&self) -> Option<VisibilityTrigger> {
        self.pending
    }

    #[must_use]
    pub const fn pass(&self) -> PassId {
        self.pass
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [R] {
        &mut self.rows
    }

    /// Number of rows materialized in the current pass.
    #[must_use]
    pub fn materialized(&self) -> usize {
        self.rows.len()
    }

    /// Number of pages materialized in the current pass.
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.rows.len() >= self.total
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }
}

impl<R> Default for IncrementalRenderer<R> {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
