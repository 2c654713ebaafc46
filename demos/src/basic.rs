use {
    page_alloc::{Config, Page},
    tracing_subscriber::layer::SubscriberExt as _,
};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish()
            .with(tracing_error::ErrorLayer::default()),
    )?;

    let config = Config::best_fit(1024 * 1024);

    // Host memory stands in for the device memory object page is tracking.
    let mut memory = vec![0u8; config.size as usize];
    let mut page = Page::with_config(config);

    let block = page.allocate(10)?;
    let another_block = page.allocate(10)?;

    let start = block as usize;
    memory[start..start + 10].copy_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    memory.copy_within(start..start + 10, another_block as usize);
    assert_eq!(memory[another_block as usize + 9], 9);

    tracing::info!("{:?}", page);

    page.free(block)?;
    page.free(another_block)?;

    tracing::info!(
        "Page is unused: {}, free blocks: {}",
        page.is_unused(),
        page.free_blocks().count()
    );

    Ok(())
}
