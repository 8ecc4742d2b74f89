//! Streaming List Demo: Items appear one by one as an async source yields them.
//!
//! A simulated feed produces quotes at ~20 items/s. The list shows them
//! sorted by price, highest first, re-rendering after every quote.
//!
//! Press Ctrl+C to cancel the feed early. Set `RUST_LOG=debug` to see the
//! consumer's log on stderr.

use std::io;
use std::time::Duration;

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use flywheel_list::{
    AsyncList, AsyncListProps, CancellationToken, ConsumeExit, Engine, ItemSource, Node,
    TerminalConfig, TerminalSurface,
};
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

/// Symbols for the simulated feed.
const SYMBOLS: &[&str] = &["ACME", "GLOBX", "INIT", "UMBR", "WAYN", "STRK", "TYRL", "OSCP"];

#[derive(Debug, Clone)]
struct Quote {
    seq: u32,
    symbol: &'static str,
    cents: u32,
}

fn quote_feed(count: u32) -> impl futures::Stream<Item = Quote> {
    let interval = tokio::time::interval(Duration::from_millis(50));
    tokio_stream::wrappers::IntervalStream::new(interval)
        .skip(1)
        .take(count as usize)
        .enumerate()
        .map(|(seq, _)| {
            let seq = u32::try_from(seq).unwrap_or(u32::MAX);
            // Deterministic spread of prices between 100.00 and 149.99
            let cents = 10_000 + (seq * 7919) % 5_000;
            Quote {
                seq,
                symbol: SYMBOLS[seq as usize % SYMBOLS.len()],
                cents,
            }
        })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let (width, height) = terminal::size()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let surface = TerminalSurface::new(
        io::stdout(),
        TerminalConfig {
            top: 0,
            width,
            height,
            ..TerminalConfig::default()
        },
    );
    let engine = Engine::new(surface)?;

    let cancel = CancellationToken::new();
    let props = AsyncListProps::templated(ItemSource::from_stream(quote_feed(200)), |quote: &Quote| {
        Node::text(format!(
            "{:>4}  {:<6} {:>6}.{:02}",
            quote.seq,
            quote.symbol,
            quote.cents / 100,
            quote.cents % 100
        ))
    })
    .element("li")
    .container("ol")
    .order_by_descending(|quote: &Quote| quote.cents)
    .cancellation_token(cancel.clone());

    let mut list = AsyncList::new(props);
    list.initialize(&engine.handle())?;
    let task = list.take_task().ok_or("consumption task missing")?;

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let report = task.join().await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    list.dispose();
    drop(engine);

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;

    let report = report?;
    let how = match report.exit {
        ConsumeExit::Exhausted => "feed finished",
        ConsumeExit::Cancelled => "feed cancelled",
    };
    println!("{how}: {} quotes, {} renders", report.items, report.renders);
    Ok(())
}
