// Example: a bookshelf widget fed raw mouse events, with covers built through a task queue.
use std::rc::Rc;

use slidelist::{
    FlatOptions, Size, SlidingListOptions, Stream, StreamContext, View, Viewport, Wakeup,
};
use slidelist_adapter::{
    ArrayStream, CoverContent, CoverSpec, PointerOptions, RawEvent, SubstituteCover,
    SubstituteOptions, TaskQueue, TextMeasure, Widget,
};

/// Monospace text: characters are 0.55 font sizes wide, lines 1.2 tall.
struct Monospace;

impl TextMeasure for Monospace {
    fn measure(&self, lines: &[&str], font_size: u32, _max_width: f64) -> Size {
        let size = f64::from(font_size);
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(widest as f64 * size * 0.55, lines.len() as f64 * size * 1.2)
    }
}

/// Ticks the widget and the cover queue whenever either is due.
fn drive<S: Stream, V: View<S::Item>>(
    widget: &mut Widget<S, V>,
    queue: &TaskQueue,
    until: u64,
    now_ms: &mut u64,
) {
    while *now_ms < until {
        *now_ms += 16;
        queue.tick(*now_ms);
        let due = match widget.next_wakeup() {
            Some(Wakeup::Frame) => true,
            Some(Wakeup::At(at)) => at <= *now_ms,
            None => false,
        };
        if due {
            widget.tick(*now_ms);
        }
    }
}

fn main() {
    let books: Vec<CoverSpec> = ["Persuasion", "Middlemarch", "Bleak House", "Villette"]
        .iter()
        .enumerate()
        .map(|(i, title)| CoverSpec {
            colour_seed: i as u64 + 1,
            title: (*title).to_owned(),
            authors: vec!["Anon.".to_owned()],
            ..CoverSpec::default()
        })
        .collect();

    let queue = TaskQueue::new();
    let covers = queue.clone();
    let options = Rc::new(SubstituteOptions::default());
    let measure = Rc::new(Monospace);
    let stream = ArrayStream::new(books, move |spec: &CoverSpec, context: &StreamContext| {
        let (cover, _) = SubstituteCover::new(
            spec.clone(),
            context,
            options.clone(),
            measure.clone(),
            &covers,
            0,
        );
        cover
    });

    let mut widget = Widget::bookshelf(
        stream,
        Viewport::new(480.0, 160.0),
        FlatOptions::default().with_item_aspect(0.7).with_spacing(1.2),
        SlidingListOptions::new(0).with_step_interval_ms(None),
        PointerOptions::default(),
        0,
    )
    .expect("valid widget");

    let mut now_ms = 0;
    drive(&mut widget, &queue, 200, &mut now_ms);

    // Drag 150px to the left over 100ms and let go.
    let press = RawEvent::MouseDown {
        button: 1,
        page_x: 300.0,
        page_y: 80.0,
        default_prevented: false,
    };
    widget.handle(&press, now_ms);
    for step in 1..=5 {
        now_ms += 20;
        let event = RawEvent::MouseMove {
            page_x: 300.0 - 30.0 * f64::from(step),
            page_y: 80.0,
            inside: true,
        };
        let response = widget.handle(&event, now_ms);
        println!("t={now_ms} prevent_default={}", response.prevent_default);
    }
    let release = RawEvent::MouseUp {
        button: 1,
        page_x: 150.0,
        page_y: 80.0,
    };
    widget.handle(&release, now_ms);
    let until = now_ms + 2000;
    drive(&mut widget, &queue, until, &mut now_ms);

    widget.list().for_each_placement(|_, index, cover, placement| {
        if !placement.visible {
            return;
        }
        let colour = match cover.content() {
            Some(CoverContent::Substitute(layout)) => format!("{:?}", layout.colour),
            Some(CoverContent::Image { url, .. }) => url,
            None => "loading".to_owned(),
        };
        println!("#{index} x={:.0} {} {colour}", placement.x, cover.spec().title);
    });
    widget.remove();
}
