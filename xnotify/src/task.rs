use console::{style, Term};
use std::time::Instant;

pub struct TaskRunner {
    term: Term,
    num_tasks: u32,
    current_task: u32,
    now: Instant,
    descr: String,
    verbose: bool,
}

impl TaskRunner {
    pub fn new(num_tasks: u32, verbose: bool) -> Self {
        let term = Term::stdout();
        // progress lines can only be rewritten on a terminal
        let verbose = verbose || !term.is_term();
        Self {
            term,
            num_tasks,
            current_task: 0,
            now: Instant::now(),
            descr: "".into(),
            verbose,
        }
    }

    fn task_id(&self) -> String {
        style(format!("[{}/{}]", self.current_task + 1, self.num_tasks))
            .force_styling(true)
            .to_string()
    }

    pub fn start_task(&mut self, descr: impl Into<String>) {
        self.now = Instant::now();
        self.descr = descr.into();
        println!("{} {}", self.task_id(), &self.descr);
    }

    fn finish_task(&mut self, status: Status) {
        if !self.verbose {
            self.term.clear_last_lines(1).ok();
        }
        let status = match status {
            Status::Done => {
                let time = self.now.elapsed();
                format!("[{}ms]", time.as_millis())
            }
            Status::Failed => style("[FAILED]").red().to_string(),
        };
        println!("{} {} {}", self.task_id(), &self.descr, status);
        self.current_task += 1;
    }

    pub fn end_task(&mut self) {
        self.finish_task(Status::Done);
    }

    pub fn fail_task(&mut self) {
        self.finish_task(Status::Failed);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Status {
    Done,
    Failed,
}
