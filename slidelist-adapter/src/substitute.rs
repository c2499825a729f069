//! Book covers that fall back to a generated substitute when no image is available.
//!
//! A substitute is a solid, deterministically coloured box with the title near the top and the
//! authors along the bottom, each shrunk until it fits. Laying one out needs text measurement,
//! which is expensive, so substitutes are built through a [`TaskQueue`] one per tick.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slidelist::{Item, RefreshHandle, Size, StreamContext};

use crate::TaskQueue;

const LEHMER_MODULUS: u64 = 4_294_967_291;
const LEHMER_MULTIPLIER: u64 = 279_470_273;

/// A small multiplicative congruential generator. The same seed always yields the same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LehmerRng {
    state: u64,
}

impl LehmerRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % LEHMER_MODULUS,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * LEHMER_MULTIPLIER % LEHMER_MODULUS;
        self.state as f64 / LEHMER_MODULUS as f64
    }
}

/// Muted RGB colour for a substitute cover.
pub fn cover_colour(seed: u64) -> [u8; 3] {
    let mut rng = LehmerRng::new(seed);
    // 256 * 0.8 stays below 256.
    [(); 3].map(|()| (256.0 * (0.4 + 0.4 * rng.next_f64())).floor() as u8)
}

/// What a cover shows.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverSpec {
    pub image_url: Option<String>,
    pub colour_seed: u64,
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
}

/// Typography limits for substitutes, in pixels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstituteOptions {
    pub title_font_size: u32,
    pub subtitle_font_size: u32,
    pub subtitle_max_height: f64,
    pub authors_font_size: u32,
    pub authors_max_height: f64,
    /// Texture drawn over the colour, if any.
    pub background: Option<String>,
}

impl Default for SubstituteOptions {
    fn default() -> Self {
        Self {
            title_font_size: 16,
            subtitle_font_size: 12,
            subtitle_max_height: 40.0,
            authors_font_size: 12,
            authors_max_height: 40.0,
            background: None,
        }
    }
}

impl SubstituteOptions {
    pub fn with_font_sizes(mut self, title: u32, subtitle: u32, authors: u32) -> Self {
        self.title_font_size = title;
        self.subtitle_font_size = subtitle;
        self.authors_font_size = authors;
        self
    }

    pub fn with_max_heights(mut self, subtitle: f64, authors: f64) -> Self {
        self.subtitle_max_height = subtitle;
        self.authors_max_height = authors;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }
}

/// Measures text the way the host will render it.
pub trait TextMeasure {
    /// Size of `lines`, stacked, at `font_size`, each wrapped to `max_width`.
    fn measure(&self, lines: &[&str], font_size: u32, max_width: f64) -> Size;
}

/// A laid-out run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font_size: u32,
    /// Top edge relative to the cover.
    pub y: f64,
    pub size: Size,
}

/// A fully laid-out substitute.
#[derive(Clone, Debug, PartialEq)]
pub struct SubstituteLayout {
    pub size: Size,
    pub colour: [u8; 3],
    pub background: Option<String>,
    pub title: TextBlock,
    pub subtitle: Option<TextBlock>,
    pub authors: TextBlock,
}

fn shrink_to_fit(
    measure: &impl TextMeasure,
    lines: &[&str],
    start: u32,
    max_width: f64,
    max_height: f64,
) -> (u32, Size) {
    let mut font_size = start;
    let mut size = measure.measure(lines, font_size, max_width);
    while font_size > 1 && (size.height > max_height || size.width > max_width) {
        font_size -= 1;
        size = measure.measure(lines, font_size, max_width);
    }
    (font_size, size)
}

/// Lays out a substitute cover filling `bounds`.
pub fn layout_substitute(
    spec: &CoverSpec,
    options: &SubstituteOptions,
    bounds: Size,
    measure: &impl TextMeasure,
) -> SubstituteLayout {
    let authors: Vec<&str> = spec.authors.iter().map(String::as_str).collect();
    let (authors_font, authors_size) = shrink_to_fit(
        measure,
        &authors,
        options.authors_font_size,
        bounds.width,
        options.authors_max_height,
    );

    let subtitle = spec.subtitle.as_deref().map(|subtitle| {
        let (font_size, size) = shrink_to_fit(
            measure,
            &[subtitle],
            options.subtitle_font_size,
            bounds.width,
            options.subtitle_max_height,
        );
        (subtitle, font_size, size)
    });
    let subtitle_height = subtitle.map_or(0.0, |(_, _, size)| size.height);

    let free_height = bounds.height - authors_size.height - subtitle_height;
    let (title_font, title_size) = shrink_to_fit(
        measure,
        &[spec.title.as_str()],
        options.title_font_size,
        bounds.width,
        free_height,
    );

    // Towards the top, but centred in the free space when that is tighter.
    let total = title_size.height + subtitle_height;
    let title_y = ((bounds.height - total) * 0.2)
        .min((bounds.height - authors_size.height - total) / 2.0)
        .max(0.0)
        .floor();

    SubstituteLayout {
        size: bounds,
        colour: cover_colour(spec.colour_seed),
        background: options.background.clone(),
        title: TextBlock {
            lines: vec![spec.title.clone()],
            font_size: title_font,
            y: title_y,
            size: title_size,
        },
        subtitle: subtitle.map(|(text, font_size, size)| TextBlock {
            lines: vec![text.to_owned()],
            font_size,
            y: title_y + title_size.height,
            size,
        }),
        authors: TextBlock {
            lines: spec.authors.clone(),
            font_size: authors_font,
            y: bounds.height - authors_size.height,
            size: authors_size,
        },
    }
}

/// Fits a decoded cover image into `bounds`, height first, resting on the bottom edge.
///
/// Returns the drawn size and top offset, or `None` for a blank (1x1 or smaller) image.
pub fn fit_cover_image(natural: Size, bounds: Size) -> Option<(Size, f64)> {
    let (mut width, mut height) = (natural.width, natural.height);
    if width <= 1.0 || height <= 1.0 {
        return None;
    }
    if height > bounds.height {
        width = (width * bounds.height / height).round();
        height = bounds.height;
    }
    if width > bounds.width {
        height = (height * bounds.width / width).round();
        width = bounds.width;
    }
    Some((Size::new(width, height), bounds.height - height))
}

/// What a ready cover draws.
#[derive(Clone, Debug, PartialEq)]
pub enum CoverContent {
    Image { url: String, size: Size, top: f64 },
    Substitute(SubstituteLayout),
}

impl CoverContent {
    pub fn size(&self) -> Size {
        match self {
            Self::Image { size, .. } => *size,
            Self::Substitute(layout) => layout.size,
        }
    }
}

/// Everything a cover needs to build its substitute later.
struct CoverShared<M> {
    spec: CoverSpec,
    options: Rc<SubstituteOptions>,
    measure: Rc<M>,
    bounds: Size,
    refresh: RefreshHandle,
    content: RefCell<Option<CoverContent>>,
}

impl<M: TextMeasure> CoverShared<M> {
    fn set_content(&self, content: CoverContent) {
        *self.content.borrow_mut() = Some(content);
        self.refresh.request();
    }
}

fn queue_substitute<M: TextMeasure + 'static>(
    shared: Weak<CoverShared<M>>,
    queue: &TaskQueue,
    now_ms: u64,
) {
    queue.push(now_ms, move || {
        let Some(shared) = shared.upgrade() else {
            atrace!("substitute skipped for a destroyed cover");
            return;
        };
        let layout = layout_substitute(
            &shared.spec,
            &shared.options,
            shared.bounds,
            shared.measure.as_ref(),
        );
        shared.set_content(CoverContent::Substitute(layout));
    });
}

/// A book cover item: the cover image when it loads, a generated substitute otherwise.
///
/// Its size is zero until one of the two is ready.
pub struct SubstituteCover<M> {
    shared: Rc<CoverShared<M>>,
}

impl<M: TextMeasure + 'static> SubstituteCover<M> {
    /// Creates the cover. Returns the image handle to complete when `spec` has an image URL;
    /// otherwise a substitute is queued right away.
    pub fn new(
        spec: CoverSpec,
        context: &StreamContext,
        options: Rc<SubstituteOptions>,
        measure: Rc<M>,
        queue: &TaskQueue,
        now_ms: u64,
    ) -> (Self, Option<CoverImageLoad<M>>) {
        let has_image = spec.image_url.is_some();
        let shared = Rc::new(CoverShared {
            spec,
            options,
            measure,
            bounds: Size::new(context.item_width, context.item_height),
            refresh: context.refresh.clone(),
            content: RefCell::new(None),
        });
        let load = if has_image {
            Some(CoverImageLoad {
                shared: Rc::downgrade(&shared),
                queue: queue.clone(),
            })
        } else {
            queue_substitute(Rc::downgrade(&shared), queue, now_ms);
            None
        };
        (Self { shared }, load)
    }

    pub fn spec(&self) -> &CoverSpec {
        &self.shared.spec
    }

    pub fn content(&self) -> Option<CoverContent> {
        self.shared.content.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.shared.content.borrow().is_some()
    }
}

impl<M> Item for SubstituteCover<M> {
    fn width(&self) -> f64 {
        self.shared.content.borrow().as_ref().map_or(0.0, |c| c.size().width)
    }

    fn height(&self) -> f64 {
        self.shared.content.borrow().as_ref().map_or(0.0, |c| c.size().height)
    }
}

impl<M> fmt::Debug for SubstituteCover<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstituteCover")
            .field("spec", &self.shared.spec)
            .field("content", &self.shared.content.borrow())
            .finish_non_exhaustive()
    }
}

/// Completion handle for a cover's image.
pub struct CoverImageLoad<M> {
    shared: Weak<CoverShared<M>>,
    queue: TaskQueue,
}

impl<M: TextMeasure + 'static> CoverImageLoad<M> {
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// The URL to load.
    pub fn url(&self) -> Option<String> {
        self.shared
            .upgrade()
            .and_then(|shared| shared.spec.image_url.clone())
    }

    /// `natural` is the decoded size, or `None` if the image failed. Blank or failed images
    /// fall back to a queued substitute.
    pub fn finish(self, natural: Option<Size>, now_ms: u64) {
        let Some(shared) = self.shared.upgrade() else {
            atrace!("cover image finished for a destroyed cover");
            return;
        };
        let fitted = natural.and_then(|natural| fit_cover_image(natural, shared.bounds));
        match (fitted, shared.spec.image_url.clone()) {
            (Some((size, top)), Some(url)) => {
                shared.set_content(CoverContent::Image { url, size, top });
            }
            _ => {
                adebug!(title = %shared.spec.title, "no usable cover image, substituting");
                queue_substitute(self.shared, &self.queue, now_ms);
            }
        }
    }
}

impl<M> fmt::Debug for CoverImageLoad<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverImageLoad")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish_non_exhaustive()
    }
}
