use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

pub struct Split {
    pub name: String,
    pub duration: Duration,
}

impl Split {
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}: {:?}", self.name, self.duration)?;
        Ok(())
    }
}

/**
 * Records the wall-clock duration of each stage of a run, so that a summary can
 * be logged once the run completes.
 */
pub struct Stopwatch {
    pub splits: Vec<Split>,
    pub name: String,
    pub start_total: Instant,
    pub start_split: Instant,
}

impl Stopwatch {
    pub fn new(name: String) -> Stopwatch {
        let now = Instant::now();
        Stopwatch {
            splits: Vec::default(),
            name,
            start_total: now,
            start_split: now,
        }
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_total.elapsed()
    }

    pub fn split_elapsed(&self) -> Duration {
        self.start_split.elapsed()
    }

    pub fn record_split(&mut self, name: String) -> Duration {
        let duration = self.split_elapsed();
        self.start_split = Instant::now();
        self.splits.push(Split { name, duration });
        duration
    }

    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "Stopwatch: {};  Total elapsed duration: {:?}",
            self.name,
            self.total_elapsed()
        )?;
        for split in self.splits.iter() {
            write!(writer, "  ")?;
            split.display(writer)?;
            writeln!(writer)?;
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        let mut buffer = Vec::new();
        if self.display(&mut buffer).is_ok() {
            tracing::info!("{}", String::from_utf8_lossy(&buffer).trim_end());
        }
    }
}
