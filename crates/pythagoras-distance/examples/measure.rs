use pythagoras_distance::*;

fn main() {
    let cell_size = 100.0;
    let unit_distance = 5.0;
    let grid_result = GridConfig::new(cell_size, unit_distance, "ft");

    let archer = Position::new(0.0, 0.0, 0.0);
    let path = [
        Position::new(300.0, 400.0, 0.0),   // 3 east, 4 south
        Position::new(0.0, 0.0, 30.0),      // straight up
        Position::new(500.0, 500.0, 0.0),   // 5 diagonal
        Position::new(400.0, 400.0, 20.0),  // diagonal and up
    ];

    match grid_result {
        Ok(grid) => {
            println!("Measuring from {}", archer);
            println!("  {}", grid);
            println!();

            for (i, target) in path.iter().enumerate() {
                let counts = space_counts(archer, *target, &grid);
                let result = measure(archer, *target, &grid);
                println!("Target {:>2}: {}", i + 1, target);
                println!("    Spaces (sorted): {:?}", counts.0);
                for rule in DistanceRule::ALL {
                    println!("    {:<9} {:>7.2} {}", rule, rule.distance(archer, *target, &grid), grid.unit_label());
                }
                println!("    Summary:  {}", result);
            }
        }
        Err(e) => {
            eprintln!("Failed to build grid: {:?}", e);
            eprintln!("Please ensure cell_size ({}) and unit_distance ({}) are positive.", cell_size, unit_distance);
        }
    }
}
