//! CLI tool for gridlayout - builds a layout from a JSON config and prints
//! visible cells (and optionally a scroll target) as JSON
//!
//! Usage:
//!   gridlayout_cli <config.json>                          # Visible cells at offset 0
//!   gridlayout_cli <config.json> --viewport 320x480 --offset 100,40
//!   gridlayout_cli <config.json> --scroll-to B7 --align right,bottom
//!   gridlayout_cli <config.json> -o out.json              # Write JSON to file
//!
//! Set `RUST_LOG=debug` for layout diagnostics on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridlayout::cell_ref::parse_cell_ref;
use gridlayout::layout::{
    GridLayout, HorizontalAlignment, ScrollPosition, VerticalAlignment, Viewport,
};
use gridlayout::types::{Address, GridConfig, Offset, Rect};
use serde::Serialize;

#[derive(Serialize)]
struct Report {
    content_width: f32,
    content_height: f32,
    offset: Offset,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<Target>,
    visible_cells: Vec<Address>,
}

#[derive(Serialize)]
struct Target {
    address: Address,
    frame: Rect,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_pair(value: &str, separator: char) -> Option<(f32, f32)> {
    let (a, b) = value.split_once(separator)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn parse_alignment(value: &str) -> Option<ScrollPosition> {
    let mut position = ScrollPosition::default();
    for part in value.split(',') {
        match part.trim() {
            "left" => position.horizontal = Some(HorizontalAlignment::Left),
            "center-x" | "centered-horizontally" => {
                position.horizontal = Some(HorizontalAlignment::CenteredHorizontally);
            }
            "right" => position.horizontal = Some(HorizontalAlignment::Right),
            "top" => position.vertical = Some(VerticalAlignment::Top),
            "center-y" | "centered-vertically" => {
                position.vertical = Some(VerticalAlignment::CenteredVertically);
            }
            "bottom" => position.vertical = Some(VerticalAlignment::Bottom),
            _ => return None,
        }
    }
    Some(position)
}

fn write_report(out: &mut impl Write, json: &str) -> io::Result<()> {
    writeln!(out, "{json}")?;
    out.flush()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        fail(
            "Usage: gridlayout_cli <config.json> [--viewport WxH] [--offset X,Y] [--scale S] \
             [--scroll-to A1 --align left,top] [-o output.json]",
        );
    }

    let input_path = &args[1];
    let mut viewport = Viewport::new(320.0, 480.0);
    let mut scroll_to: Option<Address> = None;
    let mut position = ScrollPosition::new(HorizontalAlignment::Left, VerticalAlignment::Top);
    let mut output_path: Option<String> = None;

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .unwrap_or_else(|| fail(&format!("Missing value for {flag}")));
        match flag.as_str() {
            "--viewport" => {
                let (w, h) = parse_pair(value, 'x')
                    .unwrap_or_else(|| fail(&format!("Invalid viewport: {value}")));
                viewport.resize(w, h);
            }
            "--offset" => {
                let (x, y) = parse_pair(value, ',')
                    .unwrap_or_else(|| fail(&format!("Invalid offset: {value}")));
                viewport.set_offset(Offset::new(x, y));
            }
            "--scale" => {
                viewport.scale = value
                    .parse()
                    .unwrap_or_else(|_| fail(&format!("Invalid scale: {value}")));
            }
            "--scroll-to" => {
                let (column, row) = parse_cell_ref(value)
                    .unwrap_or_else(|| fail(&format!("Invalid cell reference: {value}")));
                scroll_to = Some(Address::new(column, row));
            }
            "--align" => {
                position = parse_alignment(value)
                    .unwrap_or_else(|| fail(&format!("Invalid alignment: {value}")));
            }
            "-o" => output_path = Some(value.clone()),
            other => fail(&format!("Unknown option: {other}")),
        }
    }

    // Read and build the layout
    let json = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => fail(&format!("Error reading {input_path}: {e}")),
    };
    let config = match GridConfig::from_json(&json) {
        Ok(c) => c,
        Err(e) => fail(&format!("Error parsing config: {e}")),
    };
    let layout = match GridLayout::new(&config) {
        Ok(l) => l,
        Err(e) => fail(&format!("Invalid layout: {e}")),
    };

    let target = scroll_to.map(|address| {
        if let Err(e) = layout.scroll_to_item(address, position, &mut viewport) {
            fail(&format!("Error scrolling to {address}: {e}"));
        }
        let frame = layout
            .frame_in_viewport(address, &viewport)
            .unwrap_or_else(|e| fail(&format!("Error locating {address}: {e}")));
        Target { address, frame }
    });
    if target.is_none() {
        viewport.set_offset(layout.clamp_offset(&viewport));
    }

    let (content_width, content_height) = layout.content_size();
    let report = Report {
        content_width,
        content_height,
        offset: viewport.offset(),
        target,
        visible_cells: layout.visible_cells(&viewport),
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            if let Err(e) = write_report(&mut io::stdout().lock(), &json) {
                fail(&format!("Error writing output: {e}"));
            }
        }
    }
}
