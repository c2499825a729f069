// Example: a host loop driving a flat list from `next_wakeup`, with a drag and a throw.
use slidelist::{
    FlatOptions, FlatView, Item, LoadedSegment, PointerEvent, SegmentLoader, SlidingList,
    SlidingListOptions, Stream, StreamContext, Viewport, Wakeup,
};

#[derive(Debug)]
struct Tile(i32);

impl Item for Tile {
    fn width(&self) -> f64 {
        90.0
    }

    fn height(&self) -> f64 {
        90.0
    }
}

/// Pages of ten numbered tiles, endless in both directions.
struct Pages;

impl Stream for Pages {
    type Id = i32;
    type Data = ();
    type Item = Tile;

    fn load_segment(&mut self, id: &i32, _: &StreamContext, loader: SegmentLoader<i32, ()>) {
        loader.resolve(LoadedSegment {
            id: *id,
            prev: Some(id - 1),
            next: Some(id + 1),
            len: 10,
            data: (),
        });
    }

    fn create_item(
        &mut self,
        segment: &LoadedSegment<i32, ()>,
        index: usize,
        _: &StreamContext,
    ) -> Tile {
        Tile(segment.id * 10 + index as i32)
    }
}

fn main() {
    let view = FlatView::new(
        Viewport::new(800.0, 120.0),
        FlatOptions::default()
            .with_item_size(100.0, 100.0)
            .with_spacing(1.1),
    )
    .expect("valid view");
    let options = SlidingListOptions::new(0)
        .with_start_item(4)
        .with_step_interval_ms(Some(2000))
        .with_on_item_focused(|tile: &Tile, page: &i32, index| {
            println!("focused tile {} (page {page}, #{index})", tile.0);
        });
    let mut list = SlidingList::new(Pages, view, options, 0).expect("valid options");

    let mut now_ms = 0u64;
    let mut frames = 0u32;

    // Simulate a flick to the left at 500ms.
    let press = PointerEvent {
        page_x: 400.0,
        start_x: 400.0,
        ..PointerEvent::default()
    };
    let release = PointerEvent {
        page_x: 340.0,
        vel_x: -1.5,
        ..press
    };

    while now_ms < 6000 {
        // A 60fps host that only ticks when the list asks for it.
        now_ms += 16;
        if (500..516).contains(&now_ms) {
            list.pointer_start(&press, now_ms);
            list.pointer_move(&release, now_ms);
            list.pointer_end(&release, now_ms);
        }
        let due = match list.next_wakeup() {
            Some(Wakeup::Frame) => true,
            Some(Wakeup::At(deadline)) => now_ms >= deadline,
            None => false,
        };
        if !due {
            continue;
        }
        list.tick(now_ms);
        frames += 1;

        if frames % 10 == 0 {
            let mut visible = 0;
            list.for_each_placement(|_, _, _, _| visible += 1);
            let first = list.segments().next().map(|s| (*s.id, s.x));
            println!("t={now_ms}ms visible={visible} first_segment={first:?}");
        }
    }

    list.remove();
    println!("done after {frames} ticks");
}
