use panaginip::output::OUTPUT_PATH;
use panaginip::{run, Error, PatternParams};

fn main() -> Result<(), Error> {
    run(&PatternParams::panaginip(), OUTPUT_PATH)
}
