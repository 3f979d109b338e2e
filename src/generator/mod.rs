use indexmap::IndexSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::registers::{self, ExcludeSet};

/// Whether a line is charged against the instruction budget.
///
/// Comments, label declarations, and blank spacer lines ride free;
/// everything else, pseudo-instructions included, costs one unit.
pub fn counts_against_budget(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#') && !line.contains(':')
}

/// Produces pseudo-random MIPS-like programs bounded by an instruction
/// budget. One generator instance corresponds to one generation run.
pub struct Generator {
    budget: usize,
    rng: StdRng,
    func_labels: IndexSet<String>,
}

impl Generator {
    pub fn new(max_instr: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            budget: max_instr,
            rng,
            func_labels: IndexSet::new(),
        }
    }

    /// Appends `line` to `buf`. Free lines always land, so a structure's
    /// closing labels survive budget exhaustion; counted lines are
    /// silently dropped once the budget hits zero.
    fn emit(&mut self, buf: &mut Vec<String>, line: impl Into<String>) {
        let line = line.into();
        if !counts_against_budget(&line) {
            buf.push(line);
        } else if self.budget > 0 {
            self.budget -= 1;
            buf.push(line);
        }
    }

    /// Uniform draw from the general-purpose catalog minus `exclude`.
    /// An exclusion set that empties the pool falls back to a fixed
    /// register rather than failing.
    fn choose_register(&mut self, exclude: &ExcludeSet) -> &'static str {
        let candidates = registers::candidates(exclude);
        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(registers::FALLBACK)
    }

    fn any_register(&mut self) -> &'static str {
        self.choose_register(&ExcludeSet::new())
    }

    fn imm16(&mut self) -> u16 {
        self.rng.gen_range(0..=0xFFFF)
    }

    /// One arithmetic/logic instruction. Only the destination honors
    /// `exclude`; sources are reads and cannot corrupt protected state.
    fn gen_arith(&mut self, buf: &mut Vec<String>, exclude: &ExcludeSet) {
        let roll: f64 = self.rng.gen_range(0.0..1.0);
        let rd = self.choose_register(exclude);

        if roll < 0.4 {
            let rs = self.any_register();
            let rt = self.any_register();
            let op = if self.rng.gen_bool(0.5) { "add" } else { "sub" };
            self.emit(buf, format!("{op} {rd}, {rs}, {rt}"));
        } else if roll < 0.7 {
            let rs = self.any_register();
            let imm = self.imm16();
            self.emit(buf, format!("ori {rd}, {rs}, 0x{imm:04X}"));
        } else if roll < 0.85 {
            let imm = self.imm16();
            self.emit(buf, format!("lui {rd}, 0x{imm:04X}"));
        } else {
            self.emit(buf, "nop");
        }
    }

    /// One load or store against `base`, offset word-aligned in [0, 1020].
    fn gen_mem(&mut self, buf: &mut Vec<String>, exclude: &ExcludeSet, base: &str) {
        let rt = self.choose_register(exclude);
        let offset = self.rng.gen_range(0..256) * 4;
        let op = if self.rng.gen_bool(0.5) { "lw" } else { "sw" };
        self.emit(buf, format!("{op} {rt}, {offset}({base})"));
    }

    /// Call to a uniformly chosen declared subroutine; no-op while none
    /// exist. Clobbers `$ra` — call sites never rely on it surviving.
    fn gen_call(&mut self, buf: &mut Vec<String>) {
        if self.func_labels.is_empty() {
            return;
        }
        let idx = self.rng.gen_range(0..self.func_labels.len());
        let line = format!("jal {}", self.func_labels[idx]);
        self.emit(buf, line);
    }

    /// Up to `count` instructions, stopping early once the budget is
    /// spent. A single roll cascades: call, then memory, then the
    /// arithmetic fallthrough, so closing a gate shifts the effective
    /// weights of the rest.
    fn mix_body(
        &mut self,
        buf: &mut Vec<String>,
        count: usize,
        exclude: &ExcludeSet,
        allow_mem: bool,
        allow_call: bool,
    ) {
        for _ in 0..count {
            if self.budget == 0 {
                break;
            }
            let roll: f64 = self.rng.gen_range(0.0..1.0);
            if allow_call && !self.func_labels.is_empty() && roll < 0.1 {
                self.gen_call(buf);
            } else if allow_mem && roll < 0.4 {
                self.gen_mem(buf, exclude, registers::BASE);
            } else {
                self.gen_arith(buf, exclude);
            }
        }
    }

    /// Counted pre-test loop: the counter starts at `iterations`
    /// (truncated to 16 bits) and steps down to zero. Counter and step
    /// are excluded as write targets for the whole body. With `nested`,
    /// one inner loop on a disjoint counter/step pair is spliced into
    /// the middle of the body.
    pub fn make_loop(
        &mut self,
        buf: &mut Vec<String>,
        name: &str,
        iterations: u32,
        body_ops: usize,
        nested: bool,
    ) {
        let ctr = registers::LOOP_COUNTER;
        let step = registers::LOOP_STEP;
        let exclude: ExcludeSet = [ctr, step, registers::ZERO].into_iter().collect();

        self.emit(buf, format!("# --- begin loop {name} ---"));
        self.emit(
            buf,
            format!("ori {ctr}, {}, 0x{:04X}", registers::ZERO, iterations & 0xFFFF),
        );
        self.emit(buf, format!("ori {step}, {}, 0x0001", registers::ZERO));
        self.emit(buf, format!("{name}:"));
        self.emit(buf, format!("beq {ctr}, {}, {name}_end", registers::ZERO));

        if nested {
            let half = body_ops / 2;
            self.mix_body(buf, half, &exclude, true, true);
            let inner_iters = self.rng.gen_range(2..=5);
            let inner_ops = self.rng.gen_range(2..=5);
            self.inner_loop(buf, &format!("{name}_inner"), inner_iters, inner_ops, &exclude);
            self.mix_body(buf, body_ops - half, &exclude, true, true);
        } else {
            self.mix_body(buf, body_ops, &exclude, true, true);
        }

        self.emit(buf, format!("sub {ctr}, {ctr}, {step}"));
        self.emit(buf, format!("beq {0}, {0}, {name}", registers::ZERO));
        self.emit(buf, format!("{name}_end:"));
        self.emit(buf, format!("# --- end loop {name} ---"));
    }

    /// Inner loop of a nested pair. Its body runs under the union of
    /// both loops' exclusions, so the outer counter and step survive it.
    fn inner_loop(
        &mut self,
        buf: &mut Vec<String>,
        name: &str,
        iterations: u32,
        body_ops: usize,
        outer_exclude: &ExcludeSet,
    ) {
        let ctr = registers::INNER_COUNTER;
        let step = registers::INNER_STEP;
        let mut exclude = outer_exclude.clone();
        exclude.insert(ctr);
        exclude.insert(step);

        self.emit(
            buf,
            format!("ori {ctr}, {}, 0x{:04X}", registers::ZERO, iterations & 0xFFFF),
        );
        self.emit(buf, format!("ori {step}, {}, 0x0001", registers::ZERO));
        self.emit(buf, format!("{name}:"));
        self.emit(buf, format!("beq {ctr}, {}, {name}_end", registers::ZERO));
        self.mix_body(buf, body_ops, &exclude, true, true);
        self.emit(buf, format!("sub {ctr}, {ctr}, {step}"));
        self.emit(buf, format!("beq {0}, {0}, {name}", registers::ZERO));
        self.emit(buf, format!("{name}_end:"));
    }

    /// Leaf subroutines, rendered into a side buffer for relocation
    /// after the main body. Each label becomes callable the moment it is
    /// declared, so code generated later may `jal` to it. Bodies leave
    /// the base address and `$ra` untouched and never call out.
    pub fn leaf_functions(&mut self, count: usize) -> Vec<String> {
        let mut buf = Vec::new();
        let exclude: ExcludeSet = [registers::BASE, registers::RA, registers::ZERO]
            .into_iter()
            .collect();

        for i in 0..count {
            let fname = format!("func_{i}");
            self.func_labels.insert(fname.clone());
            self.emit(&mut buf, "");
            self.emit(&mut buf, format!("{fname}:  # leaf"));
            let body_ops = self.rng.gen_range(3..=6);
            self.mix_body(&mut buf, body_ops, &exclude, true, false);
            self.emit(&mut buf, format!("jr {}", registers::RA));
        }

        buf
    }

    /// Assembles one complete program: header and base-address init,
    /// subroutines (into a side buffer), register seeding, a flat mixed
    /// block, the loop section, a jump over the relocated subroutine
    /// code, and the terminal label. `level` drives the loop count;
    /// values past 3 behave as 3.
    pub fn generate(&mut self, level: u32) -> Vec<String> {
        let mut main = Vec::new();

        self.emit(&mut main, ".text");
        self.emit(&mut main, format!("lui {}, 0x0000", registers::BASE));
        self.emit(&mut main, format!("ori {0}, {0}, 0x0000", registers::BASE));

        let subroutines = self.leaf_functions(2);

        // Seed a few temporaries so the straight-line code has values
        // to chew on.
        let pool = &registers::TEMP_REGS[..8];
        let seeded: Vec<&str> = pool.choose_multiple(&mut self.rng, 4).copied().collect();
        for reg in seeded {
            let imm = self.imm16();
            self.emit(&mut main, format!("ori {reg}, {}, 0x{imm:04X}", registers::ZERO));
        }

        let exclude: ExcludeSet = [registers::BASE, registers::ZERO].into_iter().collect();
        self.mix_body(&mut main, 10, &exclude, true, true);

        let loop_count = match level {
            0 | 1 => 1,
            2 => 2,
            _ => 3,
        };
        for i in 0..loop_count {
            if self.budget == 0 {
                break;
            }
            let iters = self.rng.gen_range(4..=10);
            let ops = self.rng.gen_range(5..=10);
            self.make_loop(&mut main, &format!("Loop_{i}"), iters, ops, false);
        }

        // Keep control from falling through into the subroutine bodies.
        self.emit(&mut main, format!("beq {0}, {0}, END_MAIN", registers::ZERO));

        self.emit(&mut main, "");
        self.emit(&mut main, "# --- Subroutines ---");
        main.extend(subroutines);

        self.emit(&mut main, "");
        self.emit(&mut main, "END_MAIN:");

        main
    }
}
