use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keygrid::geometry::KeyboardGeometry;
use keygrid::keycodes::ReservedKey;
use keygrid::layout::{Layout, Slot};
use keygrid::optimizer::Improvement;
use keygrid::scorer::costs::CostCategory;
use keygrid::scorer::ScoreDetails;
use strum::IntoEnumIterator;

/// Blue (easy) to red (hard), indexed by effort.
const EFFORT_COLORS: [(u8, u8, u8); 10] = [
    (33, 150, 243),
    (53, 143, 226),
    (74, 136, 210),
    (94, 129, 194),
    (115, 123, 177),
    (136, 116, 161),
    (156, 109, 145),
    (177, 103, 128),
    (197, 96, 112),
    (218, 89, 96),
];

fn effort_color(effort: u8) -> Color {
    let (r, g, b) = EFFORT_COLORS[(effort as usize).min(EFFORT_COLORS.len() - 1)];
    Color::Rgb { r, g, b }
}

pub fn print_layout_grid(name: &str, layout: &Layout, geom: &KeyboardGeometry) {
    println!("\nLayout: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for r in 0..geom.rows {
        let cells: Vec<Cell> = (0..geom.cols)
            .map(|c| {
                let i = r * geom.cols + c;
                let cell = match layout.slot(i) {
                    Slot::Reserved(key) => Cell::new(key.glyph()).fg(Color::DarkGrey),
                    Slot::Free(b' ') => Cell::new('␣').fg(effort_color(geom.key(i).effort)),
                    Slot::Free(b) => Cell::new(b as char).fg(effort_color(geom.key(i).effort)),
                };
                cell.set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
    if let Some(legend) = reserved_legend(layout, geom) {
        println!("{}", legend);
    }
    println!("Keys: {}", layout.free_chars());
}

fn reserved_legend(layout: &Layout, geom: &KeyboardGeometry) -> Option<String> {
    let placed: Vec<ReservedKey> = (0..geom.cell_count())
        .filter_map(|i| match layout.slot(i) {
            Slot::Reserved(key) => Some(key),
            Slot::Free(_) => None,
        })
        .collect();
    if placed.is_empty() {
        return None;
    }
    let entries: Vec<String> = ReservedKey::iter()
        .filter(|k| placed.contains(k))
        .map(|k| format!("{} {}", k.glyph(), k))
        .collect();
    Some(entries.join("  "))
}

pub fn print_improvement_header(ev: &Improvement) {
    println!(
        "\nWorker: {}  Gen: {}  Total: {}  Mutation: {}  Iter: {}",
        ev.worker, ev.generation, ev.attempts, ev.mutations, ev.stagnation
    );
}

pub fn print_score_report(d: &ScoreDetails) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Share").fg(Color::Cyan),
        Cell::new("Raw"),
    ]);
    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let pct = |v: f64| v / d.cost * 100.0;
    for cat in CostCategory::ALL {
        let share = cat.contribution(d);
        let color = if share < 0.0 { Color::Green } else { Color::Red };
        let raw = match cat {
            CostCategory::Distance => format!("{:.0}", cat.raw(d)),
            _ => format!("{}", cat.raw(d)),
        };
        table.add_row(vec![
            Cell::new(cat.label()),
            Cell::new(format!("{:5.1}%", pct(share))).fg(color),
            Cell::new(raw),
        ]);
    }
    table.add_row(vec![
        Cell::new("Hand Inequality"),
        Cell::new(format!("{:.3}", d.hand_inequality)),
        Cell::new(format!("{:.3}", d.hand_inequality)),
    ]);
    table.add_row(vec![
        Cell::new("Finger Inequality"),
        Cell::new(format!("{:.3}", d.finger_inequality * 0.25)),
        Cell::new(format!("{:.3}", d.finger_inequality)),
    ]);
    println!("{}", table);

    let mut usage = Table::new();
    usage.load_preset(ASCII_FULL);
    let mut left = vec![Cell::new(format!("L {:4.1}", d.hand_usage[0] * 100.0))
        .add_attribute(Attribute::Bold)];
    left.extend(
        d.finger_usage[..5]
            .iter()
            .map(|u| Cell::new(format!("{:4.1}", u * 100.0))),
    );
    let mut right: Vec<Cell> = d.finger_usage[5..]
        .iter()
        .map(|u| Cell::new(format!("{:4.1}", u * 100.0)))
        .collect();
    right.push(Cell::new(format!("R {:4.1}", d.hand_usage[1] * 100.0)).add_attribute(Attribute::Bold));
    left.extend(right);
    usage.add_row(left);
    println!("{}", usage);

    println!("Cost: {:.4}", d.cost);
}

pub fn print_sample_summary(samples: usize, best: f64, mean: f64, worst: f64) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Samples", "Best", "Mean", "Worst"]);
    table.add_row(vec![
        Cell::new(samples),
        Cell::new(format!("{:.2}", best)).fg(Color::Green),
        Cell::new(format!("{:.2}", mean)),
        Cell::new(format!("{:.2}", worst)).fg(Color::Red),
    ]);
    println!("{}", table);
}
