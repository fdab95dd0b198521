//! Integration tests against the community 6809 SingleStepTests vectors
//! (one JSON file per opcode, each holding hundreds of randomized cases).
//!
//! Unlike the m68k core's prefetch-pipeline vectors, 6809 test vectors ship
//! as plain JSON: `{"name","initial":{...},"final":{...},"cycles":N}`.
//! Skipped gracefully (not a test failure) when the vector directory isn't
//! present locally — these are large enough that we don't vendor them.

use cpu_6809::Mc6809;
use emu_core::{Bus, Cpu};
use glob::glob;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CpuState {
    pc: u16,
    s: u16,
    u: u16,
    dp: u8,
    x: u16,
    y: u16,
    a: u8,
    b: u8,
    cc: u8,
    ram: Vec<(u16, u8)>,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    #[allow(dead_code)]
    cycles: Vec<serde_json::Value>,
}

struct TestBus {
    mem: [u8; 0x1_0000],
}

impl TestBus {
    fn new() -> Self {
        Self { mem: [0; 0x1_0000] }
    }
}

impl Bus for TestBus {
    fn read(&mut self, address: u16) -> u8 {
        self.mem[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.mem[address as usize] = value;
    }
}

fn apply(cpu: &mut Mc6809, bus: &mut TestBus, state: &CpuState) {
    cpu.pc = state.pc;
    cpu.s = state.s;
    cpu.u = state.u;
    cpu.dp = state.dp;
    cpu.x = state.x;
    cpu.y = state.y;
    cpu.a = state.a;
    cpu.b = state.b;
    cpu.cc = state.cc;
    for &(addr, value) in &state.ram {
        bus.write(addr, value);
    }
}

fn matches_final(cpu: &Mc6809, bus: &mut TestBus, state: &CpuState) -> Result<(), String> {
    if cpu.pc != state.pc {
        return Err(format!("pc: got {:#06x}, want {:#06x}", cpu.pc, state.pc));
    }
    if cpu.s != state.s || cpu.u != state.u || cpu.x != state.x || cpu.y != state.y {
        return Err("index/stack register mismatch".into());
    }
    if cpu.a != state.a || cpu.b != state.b {
        return Err("accumulator mismatch".into());
    }
    if cpu.dp != state.dp {
        return Err("dp mismatch".into());
    }
    if cpu.cc != state.cc {
        return Err(format!("cc: got {:#04x}, want {:#04x}", cpu.cc, state.cc));
    }
    for &(addr, value) in &state.ram {
        let got = bus.read(addr);
        if got != value {
            return Err(format!("ram[{addr:#06x}]: got {got:#04x}, want {value:#04x}"));
        }
    }
    Ok(())
}

fn run_file(path: &Path) -> (usize, usize, Vec<String>) {
    let content = fs::read_to_string(path).expect("read test vector file");
    let cases: Vec<TestCase> = serde_json::from_str(&content).expect("parse test vectors");

    let mut passed = 0;
    let mut failed = 0;
    let mut errors = Vec::new();

    for case in &cases {
        let mut bus = TestBus::new();
        let mut cpu = Mc6809::new();
        apply(&mut cpu, &mut bus, &case.initial);
        Cpu::<TestBus>::step(&mut cpu, &mut bus);
        match matches_final(&cpu, &mut bus, &case.final_state) {
            Ok(()) => passed += 1,
            Err(e) => {
                failed += 1;
                errors.push(format!("{}: {e}", case.name));
            }
        }
    }

    (passed, failed, errors)
}

/// Run every vector file found under `test-data/6809/v1` relative to this
/// crate. Not part of the default test run: the vectors aren't vendored.
#[test]
#[ignore]
fn run_all_single_step_tests() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/6809/v1");
    if !dir.exists() {
        eprintln!("test vector directory not found: {}", dir.display());
        return;
    }

    let mut total_passed = 0;
    let mut total_failed = 0;

    for entry in glob(&format!("{}/*.json", dir.display())).expect("glob pattern") {
        let path = entry.expect("readable directory entry");
        let (passed, failed, errors) = run_file(&path);
        total_passed += passed;
        total_failed += failed;
        if !errors.is_empty() {
            println!("{}: {passed} passed, {failed} failed", path.display());
            for err in errors.iter().take(5) {
                println!("  {err}");
            }
        }
    }

    println!("total: {total_passed} passed, {total_failed} failed");
    assert_eq!(total_failed, 0);
}
