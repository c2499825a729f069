// Example: a train view; prints the scale and opacity of each visible item after a step.
use slidelist::{
    Item, LoadedSegment, SegmentLoader, SimpleItem, Size, SlidingList, SlidingListOptions, Stream,
    StreamContext, TrainOptions, TrainView, Viewport, Wakeup,
};

/// One segment of covers whose "images" decode immediately.
struct Covers(Vec<Size>);

impl Stream for Covers {
    type Id = ();
    type Data = ();
    type Item = SimpleItem<usize>;

    fn load_segment(&mut self, _: &(), _: &StreamContext, loader: SegmentLoader<(), ()>) {
        loader.resolve(LoadedSegment {
            id: (),
            prev: None,
            next: None,
            len: self.0.len(),
            data: (),
        });
    }

    fn create_item(
        &mut self,
        _: &LoadedSegment<(), ()>,
        index: usize,
        context: &StreamContext,
    ) -> SimpleItem<usize> {
        let (item, load) = SimpleItem::new(index, context);
        load.finish(self.0.get(index).copied());
        item
    }
}

fn run(list: &mut SlidingList<Covers, TrainView>, now_ms: &mut u64) {
    while let Some(Wakeup::Frame) = list.next_wakeup() {
        *now_ms += 16;
        list.tick(*now_ms);
    }
}

fn main() {
    let covers = (0..12)
        .map(|i| Size::new(300.0 + 20.0 * i as f64, 400.0))
        .collect();
    let view = TrainView::new(Viewport::new(900.0, 240.0), TrainOptions::default())
        .expect("valid view");
    let options = SlidingListOptions::new(()).with_step_interval_ms(None);
    let mut list = SlidingList::new(Covers(covers), view, options, 0).expect("valid options");

    let mut now_ms = 0;
    run(&mut list, &mut now_ms);
    list.step_item(1, now_ms);
    run(&mut list, &mut now_ms);

    list.for_each_placement(|_, index, item, placement| {
        println!(
            "#{index:2} {}x{} at x={:7.1} scale={:.2} opacity={:.2} z={}",
            item.width(),
            item.height(),
            placement.x,
            placement.scale,
            placement.opacity,
            placement.z
        );
    });
}
