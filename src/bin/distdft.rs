// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Read a matrix from stdin, transform it, print the spectrum on stdout.
//!
//! Built with the `mpi` feature, run under an MPI launcher:
//!
//! ```text
//! mpirun -n 4 distdft < matrix.txt
//! ```
//!
//! Without it, every participant is a thread of this process and
//! `DFT_PARTICIPANTS` sets how many there are.

use std::io;
use std::process;

use distdft::config::DftConfig;
use distdft::error::DftResult;
use distdft::io::{read_matrix, write_frequency_matrix};
use distdft::util::logging::init_logging_with_level;
use distdft::{dft_error, dft_info};

fn main() {
    let config = match DftConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("distdft: {}", e);
            process::exit(1);
        }
    };
    init_logging_with_level(config.log_level);
    dft_info!("distdft {}", distdft::VERSION);

    if let Err(e) = run(&config) {
        dft_error!("{}", e);
        eprintln!("distdft: {}", e);
        process::exit(1);
    }
}

#[cfg(feature = "mpi")]
fn run(config: &DftConfig) -> DftResult<()> {
    use distdft::net::mpi::MpiCommunicator;
    use distdft::{run_with_context, DftContext};

    let comm = MpiCommunicator::make()?;
    let ctx = DftContext::new(Box::new(comm), config.clone());

    let matrix = if ctx.is_coordinator() {
        Some(read_matrix(io::stdin().lock(), config.max_size)?)
    } else {
        None
    };

    if let Some(spectrum) = run_with_context(&ctx, matrix)? {
        write_frequency_matrix(io::stdout().lock(), &spectrum)?;
    }
    Ok(())
}

#[cfg(not(feature = "mpi"))]
fn run(config: &DftConfig) -> DftResult<()> {
    let matrix = read_matrix(io::stdin().lock(), config.max_size)?;
    let spectrum = distdft::run_local(&matrix, config)?;
    write_frequency_matrix(io::stdout().lock(), &spectrum)?;
    Ok(())
}
