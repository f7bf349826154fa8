use crate::error::RobotError;
use crate::grid::Grid;
use crate::robot_lang::{Instruction, Program};
use crate::trace::{TraceEntry, TraceObserver};
use log::{debug, info, trace};

/// Result of executing an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Continue with the next instruction
    Continue,
    /// Jump to the given instruction index
    Jump(usize),
}

/// Program-counter driven interpreter for one run over a borrowed grid
pub struct Interpreter<'g> {
    /// The field being mutated
    grid: &'g mut Grid,
    /// Index of the next instruction
    pc: usize,
    /// Loop heads entered and not yet returned to
    loop_heads: Vec<usize>,
    /// Effects applied so far
    trace: Vec<TraceEntry>,
    /// Instructions executed so far
    steps: u64,
    observer: Option<Box<dyn TraceObserver>>,
}

impl<'g> Interpreter<'g> {
    pub fn new(grid: &'g mut Grid) -> Self {
        Interpreter {
            grid,
            pc: 0,
            loop_heads: Vec::new(),
            trace: Vec::new(),
            steps: 0,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn TraceObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn TraceObserver>>) {
        self.observer = observer;
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<TraceEntry> {
        self.trace
    }

    /// Run until the program ends or an instruction fails
    pub fn run(&mut self, program: &Program) -> Result<(), RobotError> {
        self.run_with_limit(program, None)
    }

    /// Run with an optional budget of executed instructions.
    ///
    /// On failure the grid and trace keep every effect applied before the
    /// failing instruction.
    pub fn run_with_limit(
        &mut self,
        program: &Program,
        max_steps: Option<u64>,
    ) -> Result<(), RobotError> {
        info!(
            "Running {} instructions, robot at {}",
            program.len(),
            self.grid.robot()
        );
        self.pc = 0;
        self.loop_heads.clear();

        let result = self.execute_all(program, max_steps);

        if let Some(observer) = self.observer.as_mut() {
            observer.on_finish(self.steps, self.trace.len());
        }
        match &result {
            Ok(()) => info!("Run finished, robot at {}", self.grid.robot()),
            Err(e) => info!(
                "Run stopped at instruction {} (line {:?}): {}",
                self.pc,
                program.line_of(self.pc),
                e
            ),
        }
        result
    }

    fn execute_all(&mut self, program: &Program, max_steps: Option<u64>) -> Result<(), RobotError> {
        while let Some(&instruction) = program.get(self.pc) {
            if let Some(limit) = max_steps {
                if self.steps >= limit {
                    return Err(RobotError::StepLimitExceeded(limit));
                }
            }

            trace!("{:04}: {}", self.pc, instruction);
            let next = match self.execute_instruction(instruction)? {
                ExecutionResult::Continue => self.pc + 1,
                ExecutionResult::Jump(target) => target,
            };
            self.steps += 1;
            self.pc = next;
        }
        Ok(())
    }

    /// Execute a single instruction at the current pc
    pub fn execute_instruction(
        &mut self,
        instruction: Instruction,
    ) -> Result<ExecutionResult, RobotError> {
        match instruction {
            Instruction::Move(direction) => {
                let (dx, dy) = direction.delta();
                let cell = self.grid.apply_move(dx, dy)?;
                self.record(TraceEntry::moved(cell));
                Ok(ExecutionResult::Continue)
            }
            Instruction::Paint => {
                let cell = self.grid.paint_current_cell();
                self.record(TraceEntry::painted(cell));
                Ok(ExecutionResult::Continue)
            }
            Instruction::LoopStart { condition, end } => {
                if condition.evaluate(self.grid) {
                    self.loop_heads.push(self.pc);
                    Ok(ExecutionResult::Continue)
                } else {
                    debug!("Loop at {} exits: {} is false", self.pc, condition);
                    Ok(ExecutionResult::Jump(end))
                }
            }
            Instruction::LoopEnd => match self.loop_heads.pop() {
                Some(head) => Ok(ExecutionResult::Jump(head)),
                None => Err(RobotError::UnmatchedLoopEnd(self.pc)),
            },
            Instruction::IfStart { condition, end } => {
                if condition.evaluate(self.grid) {
                    Ok(ExecutionResult::Continue)
                } else {
                    Ok(ExecutionResult::Jump(end))
                }
            }
            Instruction::IfEnd => Ok(ExecutionResult::Continue),
        }
    }

    fn record(&mut self, entry: TraceEntry) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_entry(self.steps, &entry);
        }
        self.trace.push(entry);
    }
}
