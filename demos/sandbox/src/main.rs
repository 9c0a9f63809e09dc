// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// msgport sandbox
// Moves rendered markup from a render side to a host side over a channel.

use std::sync::{Arc, Mutex};

use anyhow::{ensure, Context, Result};
use msgport_core::{MessageChannel, MessageEvent, MessagePort};

/// Messages exchanged between the host and the render side.
#[derive(Debug, Clone)]
enum Frame {
    Render { component: String },
    Markup { component: String, html: String },
}

fn render(component: &str) -> String {
    format!("<div data-component=\"{component}\"><pre>{component}</pre></div>")
}

fn run_bridge() -> Result<Vec<String>> {
    let (host, renderer) = MessageChannel::<Frame>::with_labels("host", "renderer").into_ports();

    let reply = renderer.clone();
    renderer.on_message(move |event: &MessageEvent<Frame>| {
        if let Frame::Render { component } = &event.data {
            log::info!("Rendering '{component}'.");
            reply.send(Frame::Markup {
                component: component.clone(),
                html: render(component),
            });
        }
    });

    let pages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&pages);
    host.add_message_listener(move |event: &MessageEvent<Frame>| {
        if let Frame::Markup { component, html } = &event.data {
            log::info!("Host received {} bytes for '{component}'.", html.len());
            if let Ok(mut pages) = sink.lock() {
                pages.push(html.clone());
            }
        }
    });

    for component in ["Header", "CodeBlock", "Footer"] {
        host.send(Frame::Render {
            component: component.to_string(),
        });
    }

    let pages = pages
        .lock()
        .map_err(|e| anyhow::anyhow!("page buffer poisoned: {e}"))?
        .clone();
    ensure!(pages.len() == 3, "expected 3 rendered pages, got {}", pages.len());
    Ok(pages)
}

fn standalone_port() -> Result<()> {
    let lonely = MessagePort::<Frame>::with_label("lonely");
    lonely.on_message(|_| log::error!("A standalone port must never hear itself."));
    lonely.send(Frame::Render {
        component: "Nothing".to_string(),
    });

    if let Err(e) = lonely.set_peer(Some(&lonely.clone())) {
        log::warn!("{e}");
    }

    let (port1, _port2) = MessageChannel::<Frame>::new().into_ports();
    let rewire = port1.set_peer(Some(&lonely));
    ensure!(rewire.is_err(), "channel ports must refuse re-wiring");
    log::warn!("{}", rewire.err().context("missing wiring error")?);
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("msgport_core", log::LevelFilter::Debug)
        .init();

    let pages = run_bridge()?;
    for page in &pages {
        log::info!("{page}");
    }
    standalone_port()?;
    Ok(())
}
