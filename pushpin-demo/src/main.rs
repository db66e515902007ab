use html_pushpin::prelude::*;

/// Headless walkthrough: a few pins over a map that pans and zooms
fn main() -> anyhow::Result<()> {
    html_pushpin::init_logging();
    register_module();

    // Create map centered on Seattle
    let center = LatLng::new(47.6062, -122.3321);
    let map = Map::new(center, 12.0, Point::new(1024.0, 768.0));

    let places = [
        ("Space Needle", LatLng::new(47.6205, -122.3493)),
        ("Pike Place", LatLng::new(47.6097, -122.3422)),
        ("Pioneer Square", LatLng::new(47.6015, -122.3343)),
    ];

    let pins: Vec<HtmlPushpin> = places
        .iter()
        .map(|(name, loc)| {
            HtmlPushpin::new(
                *loc,
                format!("<div class=\"pin\">{}</div>", name),
                Point::new(12.0, 39.0),
            )
            .with_metadata(serde_json::json!({ "name": name }))
        })
        .collect();

    let layer = HtmlPushpinLayer::with_pushpins("landmarks", pins);
    map.add_overlay(layer.clone())
        .map_err(|e| anyhow::anyhow!("failed to add overlay: {}", e))?;

    print_positions("initial view", &layer);

    map.pan_by(Point::new(200.0, 0.0));
    map.update();
    print_positions("after panning 200px east", &layer);

    map.set_zoom(14.0);
    map.update();
    print_positions("after zooming to 14", &layer);

    let bounds = layer.bounds();
    println!(
        "bounds: SW({:.4}, {:.4}) NE({:.4}, {:.4})",
        bounds.south_west.lat, bounds.south_west.lng, bounds.north_east.lat, bounds.north_east.lng
    );

    println!("\nrendered overlay:\n{}", map.render_html());

    map.remove_overlay(layer.id());
    log::info!(
        "overlay removed, {} view-change listeners left",
        map.listener_count(VIEW_CHANGE_EVENT)
    );
    Ok(())
}

fn print_positions(label: &str, layer: &HtmlPushpinLayer) {
    println!("{}:", label);
    for pin in layer.pushpins() {
        let name = pin
            .metadata()
            .and_then(|m| m["name"].as_str().map(str::to_string))
            .unwrap_or_default();
        match pin.position() {
            Some(p) => println!("   {:<16} left={:>8.1} top={:>8.1}", name, p.x, p.y),
            None => println!("   {:<16} (not positioned)", name),
        }
    }
}
