// Example: cross-fading captions, changing target mid-transition.
use slidelist::Wakeup;
use slidelist_adapter::{FadeContainer, FadeTransition};

#[derive(Default)]
struct Captions {
    shown: Vec<String>,
}

impl FadeContainer for Captions {
    type Element = String;

    fn append(&mut self, element: &String) {
        println!("  + {element}");
        self.shown.push(element.clone());
    }

    fn remove(&mut self, element: &String) {
        println!("  - {element}");
        self.shown.retain(|e| e != element);
    }

    fn set_opacity(&mut self, element: &String, opacity: f64) {
        println!("  {element}: {opacity:.2}");
    }
}

fn main() {
    let mut fade = FadeTransition::new(Captions::default(), 200, 100, Some(300), 0);
    let mut now_ms = 0u64;
    let run_until = |fade: &mut FadeTransition<Captions>, until: u64, now_ms: &mut u64| {
        while let Some(wakeup) = fade.next_wakeup() {
            let next = match wakeup {
                Wakeup::Frame => *now_ms + 50,
                Wakeup::At(at) => at,
            };
            if next > until {
                break;
            }
            *now_ms = next;
            println!("t={now_ms}");
            fade.tick(*now_ms);
        }
        *now_ms = until;
    };

    fade.show("Persuasion".to_owned(), now_ms);
    run_until(&mut fade, 250, &mut now_ms);

    // Half faded in: the new caption waits for it to fade back out first.
    fade.show("Middlemarch".to_owned(), now_ms);
    run_until(&mut fade, 2000, &mut now_ms);

    println!("shown: {:?}", fade.container().shown);
}
