// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The reference inventory daemon, `stackd`.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {clap::Parser, log::info};

use crate::{
    commands::{Handle, HandledResult},
    document::{self, Format},
    inventory::{Inventory, MemoryInventory},
};

pub mod http;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long)]
    pub listen: Option<String>,

    /// Seed the inventory from a JSON or YAML document before serving
    #[arg(long)]
    pub load: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

/// Read and apply the seed document named by `--load`.
pub fn seed(inventory: &MemoryInventory, path: &Path) -> HandledResult<()> {
    let format = Format::from_path(path).handle_err(|e| eprintln!("{e}"))?;
    let data = std::fs::read(path)
        .handle_err(|e| eprintln!("Could not read '{}': {e}", path.display()))?;
    let doc = document::decode(format, &data).handle_err(|e| eprintln!("{e}"))?;

    inventory
        .create_schema(&doc)
        .handle_err(|e| eprintln!("Could not load '{}': {e}", path.display()))?;

    info!("loaded inventory from '{}'", path.display());
    Ok(())
}

/// Serve an inventory over HTTP.
///
/// The listener is bound before the runtime starts so that bind errors are reported directly.
pub fn main(args: &Cli) -> HandledResult<()> {
    let addr = match &args.listen {
        Some(a) => a.clone(),
        None => crate::default_listen(),
    };

    let inventory = Arc::new(MemoryInventory::new());
    if let Some(path) = &args.load {
        seed(&inventory, path)?;
    }

    let listener = std::net::TcpListener::bind(&addr)
        .handle_err(|e| eprintln!("error binding to '{addr}': {e}"))?;
    listener
        .set_nonblocking(true)
        .handle_err(|e| eprintln!("error configuring listener: {e}"))?;

    run(listener, inventory)
}

/// Serve `inventory` on an already bound `listener`. Blocks until the server stops.
pub fn run(listener: std::net::TcpListener, inventory: Arc<MemoryInventory>) -> HandledResult<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .handle_err(|e| eprintln!("Could not launch server runtime: {e}"))?;

    rt.block_on(async {
        let listener = tokio::net::TcpListener::from_std(listener)
            .handle_err(|e| eprintln!("error registering listener: {e}"))?;

        if let Ok(addr) = listener.local_addr() {
            info!("listening on '{addr}'");
        }

        http::serve(listener, inventory).await;
        Ok(())
    })
}
