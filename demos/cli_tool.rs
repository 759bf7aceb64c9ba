//! CLI Tool Example
//!
//! This example demonstrates how to drive mineralmap without a graphical
//! form: it plays the form's role of gathering the inputs (file, column
//! choices, zoom, output folder) and reporting the result.

use std::process;

use mineralmap::{MapGeneratorBuilder, MapSession, MineralMapError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
        process::exit(1);
    }

    let input_path = &args[1];

    // Parse options
    let mut coord_column: Option<String> = None;
    let mut name_column: Option<String> = None;
    let mut desc_column: Option<String> = None;
    let mut output_folder: Option<String> = None;
    let mut zoom: Option<String> = None;
    let mut list_columns = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--coord-column" => {
                coord_column = Some(require_value(&args, i));
                i += 2;
            }
            "--name-column" => {
                name_column = Some(require_value(&args, i));
                i += 2;
            }
            "--desc-column" => {
                desc_column = Some(require_value(&args, i));
                i += 2;
            }
            "--output-folder" => {
                output_folder = Some(require_value(&args, i));
                i += 2;
            }
            "--zoom" => {
                zoom = Some(require_value(&args, i));
                i += 2;
            }
            "--list-columns" => {
                list_columns = true;
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    match run(
        input_path,
        coord_column,
        name_column,
        desc_column,
        output_folder,
        zoom,
        list_columns,
    ) {
        Ok(Some(path)) => {
            println!("Interactive map created successfully at {}", path.display());
        }
        Ok(None) => {}
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {} <input.xlsx> [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --list-columns            Print the file's column names and exit");
    eprintln!("  --coord-column <name>     Column holding \"lat,lon\" strings (required)");
    eprintln!("  --name-column <name>      Column holding specimen names (required)");
    eprintln!("  --desc-column <name>      Column holding descriptions (optional)");
    eprintln!("  --output-folder <path>    Folder for mineral_collection_map.html (required)");
    eprintln!("  --zoom <n>                Initial zoom level, 1-18 (default: 6)");
    eprintln!("\nExamples:");
    eprintln!("  {} specimens.xlsx --list-columns", program);
    eprintln!(
        "  {} specimens.xlsx --coord-column Coords --name-column Name --output-folder maps/",
        program
    );
}

fn require_value(args: &[String], i: usize) -> String {
    if i + 1 >= args.len() {
        eprintln!("Error: {} requires a value", args[i]);
        process::exit(1);
    }
    args[i + 1].clone()
}

fn run(
    input_path: &str,
    coord_column: Option<String>,
    name_column: Option<String>,
    desc_column: Option<String>,
    output_folder: Option<String>,
    zoom: Option<String>,
    list_columns: bool,
) -> Result<Option<std::path::PathBuf>, MineralMapError> {
    let mut session = MapSession::new();
    session.load_file(input_path)?;

    if list_columns {
        for column in session.column_names() {
            println!("{}", column);
        }
        return Ok(None);
    }

    session.set_coordinate_column(coord_column);
    session.set_name_column(name_column);
    session.set_description_column(desc_column);
    session.set_output_folder(output_folder.map(Into::into));
    if let Some(zoom) = zoom {
        session.set_zoom_text(zoom);
    }

    let generator = MapGeneratorBuilder::new().build()?;
    let path = generator.generate(&session)?;
    Ok(Some(path))
}

fn handle_error(error: MineralMapError) {
    match error {
        MineralMapError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the paths exist and you have permission to access them.");
        }
        MineralMapError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid spreadsheet or may be corrupted.");
        }
        MineralMapError::NoDataLoaded => {
            eprintln!("Error: No data loaded. Please select an input file.");
        }
        MineralMapError::MissingColumnSelection => {
            eprintln!("Error: Please select all required columns (coordinates, name).");
            eprintln!("Use --coord-column and --name-column.");
        }
        MineralMapError::ColumnNotFound(column) => {
            eprintln!("Error: Selected column does not exist in the data: {}", column);
            eprintln!("Use --list-columns to inspect the file's columns.");
        }
        MineralMapError::InvalidZoomLevel(parse_err) => {
            eprintln!("Error: Invalid zoom level: {}", parse_err);
            eprintln!("The zoom level must be an integer (1-18).");
        }
        MineralMapError::NoOutputFolder => {
            eprintln!("Error: Output folder not selected.");
            eprintln!("Use --output-folder.");
        }
        MineralMapError::InvalidCoordinate(raw) => {
            eprintln!("Error: Invalid coordinate format in row: {}", raw);
            eprintln!("Coordinate cells must contain \"latitude,longitude\".");
        }
        MineralMapError::Limit(msg) => {
            eprintln!("Limit Exceeded: {}", msg);
        }
        MineralMapError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
    }
}
