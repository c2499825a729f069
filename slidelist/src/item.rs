use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::{RefreshHandle, Size, StreamContext};

/// One displayable unit of content.
///
/// Items start with a zero size and may grow once (e.g. when their image arrives).
pub trait Item {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Fits `natural` into `bounds` preserving aspect ratio, filling the width first.
///
/// Degenerate natural sizes fit to zero.
pub fn fit_in_box(natural: Size, bounds: Size) -> Size {
    if natural.is_empty() {
        return Size::ZERO;
    }
    let mut width = bounds.width;
    let mut height = (natural.height * bounds.width / natural.width).round();
    if height > bounds.height {
        width = (natural.width * bounds.height / natural.height).round();
        height = bounds.height;
    }
    Size::new(width, height)
}

/// An image-backed item carrying arbitrary data.
///
/// Its size stays zero until the matching [`ImageLoad`] finishes.
#[derive(Debug)]
pub struct SimpleItem<T> {
    data: T,
    size: Rc<Cell<Size>>,
}

impl<T> SimpleItem<T> {
    /// Creates the item and the handle its image loader completes.
    pub fn new(data: T, context: &StreamContext) -> (Self, ImageLoad) {
        let size = Rc::new(Cell::new(Size::ZERO));
        let load = ImageLoad {
            size: Rc::downgrade(&size),
            bounds: Size::new(context.item_width, context.item_height),
            refresh: context.refresh.clone(),
        };
        (Self { data, size }, load)
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn is_ready(&self) -> bool {
        !self.size.get().is_empty()
    }
}

impl<T> Item for SimpleItem<T> {
    fn width(&self) -> f64 {
        self.size.get().width
    }

    fn height(&self) -> f64 {
        self.size.get().height
    }
}

/// Completion handle for an item's image.
///
/// Success and failure both lay the item out (failure at zero size) and request a refresh.
/// Finishing after the item was destroyed does nothing.
#[derive(Debug)]
pub struct ImageLoad {
    size: Weak<Cell<Size>>,
    bounds: Size,
    refresh: RefreshHandle,
}

impl ImageLoad {
    pub fn is_alive(&self) -> bool {
        self.size.strong_count() > 0
    }

    /// `natural` is the decoded image size, or `None` if loading failed.
    pub fn finish(self, natural: Option<Size>) {
        let Some(size) = self.size.upgrade() else {
            strace!("image finished for a destroyed item");
            return;
        };
        let fitted = natural.map_or(Size::ZERO, |n| fit_in_box(n, self.bounds));
        size.set(fitted);
        self.refresh.request();
    }
}
