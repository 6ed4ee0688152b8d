// Example: a festival timetable with 1,000 sessions rendered through a simulated scroll host.
//
// Run with `RUST_LOG=windowed_list=trace cargo run --example festival_schedule --features tracing`
// to see the engine's range updates.
use tracing_subscriber::EnvFilter;
use windowed_list::{Align, MemoryScrollHost, ScrollHost, WindowedList};

struct Session {
    stage: &'static str,
    title: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let stages = ["Main Hall", "Gym", "Courtyard", "Room 2-A"];
    let sessions: Vec<Session> = (0..1000)
        .map(|i| Session {
            stage: stages[i % stages.len()],
            title: format!("Session #{i}"),
        })
        .collect();

    let host = MemoryScrollHost::new(600);
    let mut list = WindowedList::new(
        sessions,
        |s: &Session, index: usize| format!("[{index:>4}] {:<10} {}", s.stage, s.title),
        50,
    );

    let mounted = list.mount(&host);
    println!("total_height={}", mounted.total_height());
    println!("range after mount={:?}", mounted.range());

    host.scroll_to(5000);
    let frame = mounted.render();
    println!(
        "range={:?} block_offset={} rows={}",
        frame.range(),
        frame.block_offset,
        frame.len()
    );
    for row in frame.units().take(3) {
        println!("  {row}");
    }

    // Jump to a bookmarked session, centred in the viewport.
    let bookmarked = 742;
    let target = mounted.with_window(|w| w.scroll_offset_for_index(bookmarked, Align::Center));
    host.scroll_to(target);
    println!(
        "bookmark {bookmarked}: offset={} range={:?}",
        host.viewport().scroll_offset,
        mounted.range()
    );

    mounted.unmount();
    println!("listeners after unmount={}", host.listener_count());
}
