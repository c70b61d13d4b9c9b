use panaginip::output::OUTPUT_PATH;
use panaginip::{run, Error, PatternParams};

// same output file as the coarse variant
fn main() -> Result<(), Error> {
    run(&PatternParams::drip(), OUTPUT_PATH)
}
