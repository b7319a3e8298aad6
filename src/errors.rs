// Create the Error, ErrorKind, ResultExt, and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`.
// Defines the From conversions that let try! and ? work for our `Error`.
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must be at least 1", width, height)
        }
        UnknownAlgorithm(name: String) {
            description("unknown generation algorithm")
            display("unknown generation algorithm: {:?}", name)
        }
        UnknownSide(name: String) {
            description("unknown start side")
            display("unknown start side: {:?}", name)
        }
    }
}
