use {
    page_alloc::{AllocationError, Page, Strategy},
    std::collections::VecDeque,
    tracing_subscriber::layer::SubscriberExt as _,
};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .pretty()
            .finish()
            .with(tracing_error::ErrorLayer::default()),
    )?;

    let mut page = Page::new(1024 * 1024, Strategy::FirstFit);

    let mut blocks = VecDeque::new();
    let mut failed = 0u64;

    for i in 0..1_000_000u32 {
        if blocks.len() >= 1024 {
            while blocks.len() > 700 {
                let block = blocks.pop_front().unwrap();
                page.free(block)?;
            }
        }

        // Vary sizes a bit so freed holes don't always fit the next request.
        let size = 128 + (i % 7) * 64;

        match page.allocate(size) {
            Ok(block) => blocks.push_back(block),
            Err(AllocationError::OutOfPageMemory) => failed += 1,
            Err(err) => return Err(err.into()),
        }
    }

    tracing::warn!(
        "Failed allocations: {}, free blocks: {}, used bytes: {}",
        failed,
        page.free_blocks().count(),
        page.used_size()
    );

    // Everything left is released at once.
    page.reset();
    blocks.clear();

    tracing::warn!("Free blocks after reset: {}", page.free_blocks().count());

    Ok(())
}
