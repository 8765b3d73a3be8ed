// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pipeline demos for the vizflow crates.
//!
//! Each demo runs embedded DSV data through the full pipeline (parse, roles,
//! scales, transform or layout, interaction state) and writes a standalone
//! SVG, standing in for an interactive renderer.

mod data;
mod svg;

use kurbo::Point;
use peniko::color::palette::css;

use vizflow_core::{ChartConfig, DsvOptions, FieldRoles, FieldSpec, InteractionState, parse_dsv};
use vizflow_layout::flow::{FlowLink, FlowOptions, layout_flow};
use vizflow_layout::force::{Force, SimNode, Simulation, SimulationOptions, SimulationOutcome};
use vizflow_layout::{FlowDirection, FlowSeed, connected};
use vizflow_scales::{
    BandScale, ContinuousKind, ContinuousOptions, OrdinalColorScale, PointScale, build_continuous,
};
use vizflow_transforms::stack;

fn main() {
    env_logger::init();

    for (name, svg) in [
        ("vizflow_bubble.svg", bubble_demo()),
        ("vizflow_sankey.svg", sankey_demo()),
        ("vizflow_ridgeline.svg", ridgeline_demo()),
    ] {
        std::fs::write(name, svg).expect("write demo svg");
        println!("wrote {name}");
    }
}

/// Bubble chart: happiness on x, continent rows on y, GDP as circle area,
/// positions relaxed by the force engine.
fn bubble_demo() -> String {
    let fields = [
        FieldSpec::text("country"),
        FieldSpec::number("happiness"),
        FieldSpec::number("gdp"),
        FieldSpec::text("continent"),
    ];
    let dataset =
        parse_dsv(data::HAPPINESS_DSV, &fields, DsvOptions::default()).expect("parse happiness data");
    let roles = FieldRoles::default()
        .with_x("happiness")
        .with_size("gdp")
        .with_segment("continent")
        .with_name("country")
        .resolve(&dataset)
        .expect("resolve roles");
    let (x, size, segment, name) = (
        roles.x.expect("x role"),
        roles.size.expect("size role"),
        roles.segment.expect("segment role"),
        roles.name.expect("name role"),
    );

    let config = ChartConfig::default().with_margins(20.0, 20.0, 20.0, 20.0);
    let frame = config.frame(700.0).expect("chart frame");
    let core = frame.core;

    let x_scale = build_continuous(
        ContinuousKind::Linear,
        dataset.column_f64(x),
        (core.x0, core.x1),
        ContinuousOptions {
            nice: true,
            ..Default::default()
        },
    )
    .expect("x scale");
    let size_scale = build_continuous(
        ContinuousKind::Sqrt,
        dataset.column_f64(size),
        (5.0, 18.0),
        ContinuousOptions::default(),
    )
    .expect("size scale");

    let continents: Vec<String> = (0..dataset.row_count())
        .map(|row| dataset.key(row, segment))
        .collect();
    let y_scale = PointScale::new(continents.iter().cloned(), (core.y0, core.y1))
        .expect("y scale");
    let colors = OrdinalColorScale::new(continents.iter().cloned(), config.color_scheme.clone())
        .expect("color scale");

    // One circle per row, pulled to (happiness, continent row) and kept
    // apart by collision.
    let nodes: Vec<SimNode> = (0..dataset.row_count())
        .map(|row| {
            let continent = &continents[row];
            let target = Point::new(
                x_scale.map(dataset.f64(row, x).unwrap_or(f64::NAN)),
                y_scale.position(continent).expect("continent in domain"),
            );
            let radius = size_scale.map(dataset.f64(row, size).unwrap_or(f64::NAN));
            SimNode::new(dataset.key(row, name), radius, target)
        })
        .collect();
    let forces = vec![
        Force::X { strength: 1.0 },
        Force::Y { strength: 1.2 },
        Force::Collide { padding: 1.5 },
    ];
    let mut sim = Simulation::new(nodes, forces, core, SimulationOptions::default());
    match sim.run(|_| {}) {
        SimulationOutcome::Converged { iterations } => {
            log::info!("bubble layout converged in {iterations} steps");
        }
        SimulationOutcome::ForcedStop { iterations } => {
            log::info!("bubble layout stopped at the cap after {iterations} steps");
        }
    }

    // The search box of the original chart, driven here by a fixed query.
    let mut state = InteractionState::new();
    let entities: Vec<(String, String)> = (0..dataset.row_count())
        .map(|row| (dataset.key(row, name), dataset.key(row, name)))
        .collect();
    state.search(
        "south",
        entities.iter().map(|(id, label)| (id.as_str(), label.as_str())),
    );

    let mut doc = svg::SvgDoc::new(frame.view);
    doc.rect(frame.view, css::WHITE);
    for (row, node) in sim.nodes().iter().enumerate() {
        let fill = colors.map(&continents[row]).unwrap_or(css::GRAY);
        if state.flags(&node.key).matched {
            doc.circle(node.pos, node.radius + 2.0, css::BLACK);
            doc.label(
                Point::new(node.pos.x + node.radius + 4.0, node.pos.y + 3.0),
                &node.key,
                10.0,
            );
        }
        doc.circle(node.pos, node.radius, fill);
    }
    for continent in y_scale.domain() {
        let y = y_scale.position(continent).expect("continent in domain");
        doc.label(Point::new(frame.view.x0 + 2.0, y - 14.0), continent, 11.0);
    }
    doc.finish()
}

/// Sankey diagram of a household budget, with the downstream flow from the
/// first income node highlighted.
fn sankey_demo() -> String {
    let fields = [
        FieldSpec::text("source"),
        FieldSpec::text("target"),
        FieldSpec::number("value"),
    ];
    let dataset =
        parse_dsv(data::BUDGET_DSV, &fields, DsvOptions::default()).expect("parse budget data");
    let roles = FieldRoles::default()
        .with_flow("source", "target", "value")
        .resolve(&dataset)
        .expect("resolve roles");
    let (source, target, value) = (
        roles.source.expect("source role"),
        roles.target.expect("target role"),
        roles.value.expect("value role"),
    );

    let links: Vec<FlowLink> = (0..dataset.row_count())
        .map(|row| {
            FlowLink::new(
                dataset.key(row, source),
                dataset.key(row, target),
                dataset.f64(row, value).unwrap_or(f64::NAN),
            )
        })
        .collect();

    let config = ChartConfig::default().with_margins(10.0, 90.0, 10.0, 10.0);
    let frame = config.frame(660.0).expect("chart frame");
    let layout = layout_flow(&links, frame.core, &FlowOptions::default()).expect("flow layout");

    let colors = OrdinalColorScale::new(
        layout.nodes.iter().map(|node| node.category.clone()),
        config.color_scheme.clone(),
    )
    .expect("color scale");

    // Everything downstream of the wage income node glows; the rest dims,
    // like the hover highlighting of the original chart.
    let selection = connected(&layout, FlowSeed::Node(0), FlowDirection::Downstream);

    let mut doc = svg::SvgDoc::new(frame.view);
    doc.rect(frame.view, css::WHITE);
    for (li, link) in layout.links.iter().enumerate() {
        let stroke = colors
            .map(&layout.nodes[link.source].category)
            .unwrap_or(css::GRAY);
        let opacity = if selection.links.contains(&li) { 0.7 } else { 0.25 };
        doc.ribbon(link.path, link.thickness, stroke, opacity);
    }
    for node in &layout.nodes {
        let fill = colors.map(&node.category).unwrap_or(css::GRAY);
        doc.rect(node.rect, fill);
        doc.label(
            Point::new(node.rect.x1 + 4.0, node.rect.center().y + 3.0),
            &node.name,
            10.0,
        );
    }
    doc.finish()
}

/// Ridgeline of stacked monthly temperature spans, one ridge per city.
fn ridgeline_demo() -> String {
    let fields = [
        FieldSpec::text("city"),
        FieldSpec::number("month"),
        FieldSpec::number("low"),
        FieldSpec::number("extra"),
    ];
    let dataset =
        parse_dsv(data::CLIMATE_DSV, &fields, DsvOptions::default()).expect("parse climate data");
    let city = dataset.field_id("city").expect("city field");
    let month = dataset.field_id("month").expect("month field");
    let series = [
        dataset.field_id("low").expect("low field"),
        dataset.field_id("extra").expect("extra field"),
    ];

    let stacked = stack(&dataset, city, &series).expect("stack series");

    let config = ChartConfig::default()
        .with_aspect_ratio(1.6)
        .with_margins(20.0, 20.0, 20.0, 70.0);
    let frame = config.frame(560.0).expect("chart frame");
    let core = frame.core;

    let x_scale = build_continuous(
        ContinuousKind::Linear,
        dataset.column_f64(month),
        (core.x0, core.x1),
        ContinuousOptions::default(),
    )
    .expect("x scale");
    let bands = BandScale::new(
        stacked.groups.iter().map(|group| group.key.clone()),
        (core.y0, core.y1),
    )
    .expect("band scale");
    // Ridges may overlap their neighbor's band, like a classic ridgeline.
    let ridge_height = 1.6 * bands.bandwidth() / stacked.max_stack_total;

    let mut doc = svg::SvgDoc::new(frame.view);
    doc.rect(frame.view, css::WHITE);
    for group in &stacked.groups {
        let base_y = bands.position(&group.key).expect("city in domain") + bands.bandwidth();
        for (li, layer) in group.layers.iter().enumerate() {
            let mut points: Vec<Point> = Vec::with_capacity(group.rows.len() * 2);
            for (ri, &row) in group.rows.iter().enumerate() {
                let x = x_scale.map(dataset.f64(row, month).unwrap_or(f64::NAN));
                points.push(Point::new(x, base_y - layer.spans[ri].1 * ridge_height));
            }
            for (ri, &row) in group.rows.iter().enumerate().rev() {
                let x = x_scale.map(dataset.f64(row, month).unwrap_or(f64::NAN));
                points.push(Point::new(x, base_y - layer.spans[ri].0 * ridge_height));
            }
            let fill = config.color_scheme[li % config.color_scheme.len()];
            doc.polygon(&points, fill, 0.75);
        }
        doc.label(
            Point::new(frame.view.x0 + 4.0, base_y - 4.0),
            &group.key,
            11.0,
        );
    }
    doc.finish()
}
