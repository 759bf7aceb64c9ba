//! Basic Generation Example
//!
//! Loads a specimen spreadsheet, selects the columns, and writes the
//! interactive map next to the current directory.

use mineralmap::{MapGeneratorBuilder, MapSession};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = MapSession::new();
    session.load_file("specimens.xlsx")?;

    println!("Loaded columns: {:?}", session.column_names());

    session.set_coordinate_column(Some("Coords".to_string()));
    session.set_name_column(Some("Name".to_string()));
    session.set_description_column(Some("Desc".to_string()));
    session.set_zoom_text("6");
    session.set_output_folder(Some(".".into()));

    let generator = MapGeneratorBuilder::new().build()?;
    let path = generator.generate(&session)?;

    println!("Interactive map created successfully at {}", path.display());
    Ok(())
}
