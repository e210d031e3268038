use binary_mesh::Mesh;
use binary_mesh_json::{mesh_to_json, JsonFloat};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Convert binary mesh files to and from JSON.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The binary mesh file or ".json" file to convert
    input: PathBuf,

    /// The output path. Defaults to the input path with a ".json" or ".bin" extension
    output: Option<PathBuf>,

    /// The float type of the property values in the binary file.
    /// Half precision values are written to JSON as their raw 16-bit patterns
    #[arg(long, value_enum, default_value_t = Precision::Single)]
    precision: Precision,
}

#[derive(Clone, Copy, ValueEnum)]
enum Precision {
    Half,
    Single,
    Double,
}

fn read_data_write_json<F: JsonFloat>(input_path: &Path, output_path: Option<&PathBuf>) {
    // Modify the input if no output is specified to allow dragging a file onto the executable.
    let json_output_path = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", input_path.display())));

    let parse_start_time = Instant::now();
    match Mesh::<F>::from_file(input_path) {
        Ok(mesh) => {
            eprintln!("Parse: {:?}", parse_start_time.elapsed());
            write_json(json_output_path, &mesh);
        }
        Err(error) => eprintln!("{:?}", error),
    };
}

fn write_json<F: JsonFloat, P: AsRef<Path>>(output_path: P, mesh: &Mesh<F>) {
    let json = match mesh_to_json(mesh) {
        Ok(json) => json,
        Err(error) => {
            eprintln!("{}", error);
            return;
        }
    };

    let mut output_file = std::fs::File::create(output_path).expect("unable to create file");
    output_file
        .write_all(json.as_bytes())
        .expect("unable to write");
}

fn read_json_write_data<F: JsonFloat>(input_path: &Path, output_path: Option<&PathBuf>) {
    let output = output_path
        .cloned()
        .unwrap_or_else(|| input_path.with_extension("bin"));

    let json = std::fs::read_to_string(input_path).expect("Failed to read file.");
    match serde_json::from_str::<Mesh<F>>(&json) {
        Ok(mesh) => {
            let export_time = Instant::now();
            mesh.write_to_file(output).expect("Failed to write file.");
            eprintln!("Export: {:?}", export_time.elapsed());
        }
        Err(error) => eprintln!("{:?}", error),
    }
}

fn convert<F: JsonFloat>(cli: &Cli) {
    log::debug!("Converting {:?}", cli.input);

    match cli.input.extension().and_then(|e| e.to_str()) {
        Some("json") => read_json_write_data::<F>(&cli.input, cli.output.as_ref()),
        // Assume anything else is a binary mesh.
        _ => read_data_write_json::<F>(&cli.input, cli.output.as_ref()),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.precision {
        Precision::Half => convert::<half::f16>(&cli),
        Precision::Single => convert::<f32>(&cli),
        Precision::Double => convert::<f64>(&cli),
    }
}
