use deckquote_core::intake::finish::{FINISH_LEVELS, RAIL_MIN_HEIGHT};

pub fn run() -> Result<(), deckquote_core::error::QuoteError> {
    println!("Quick deck finish levels (form field `finish`):\n");
    println!(
        "  {:<3} {:<11} {:<22} {:<10} {:<10} {:<7} {:<6} {}",
        "#", "Level", "Deck", "Rail", "Infill", "Fascia", "Stairs", "Stair extras"
    );
    println!("  {}", "-".repeat(92));

    for level in FINISH_LEVELS {
        let p = level.preset();
        let mut extras = Vec::new();
        if p.has_stair_fascia {
            extras.push("fascia");
        }
        if p.has_stair_toe_kick {
            extras.push("toe-kick");
        }
        println!(
            "  {:<3} {:<11} {:<22} {:<10} {:<10} {:<7} {:<6} {}",
            level.number(),
            level.to_string(),
            p.material,
            p.rail_material,
            p.rail_infill,
            if p.has_fascia { "yes" } else { "no" },
            format!("{} ft", p.stair_width.normalize()),
            if extras.is_empty() {
                "-".to_string()
            } else {
                extras.join(", ")
            }
        );
    }

    println!();
    println!(
        "Decks under {} ft high get no rails. Stairs are only included with hasStairs=on.",
        RAIL_MIN_HEIGHT.normalize()
    );
    Ok(())
}
