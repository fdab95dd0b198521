//! A small disassembler: decodes one instruction into its mnemonic text and
//! byte length. Not used by `execute` — a debugging/tooling collaborator.

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Inherent,
    Direct,
    Relative,
    Lrelative,
    Immediate,
    Limmediate,
    Extended,
    Indexed,
    StackImmediate,
    RegisterImmediate,
}

const INDEX_REGISTERS: [&str; 4] = ["X", "Y", "U", "S"];

fn page0_table(opcode: u8) -> Option<(&'static str, Mode)> {
    use Mode::*;
    Some(match opcode {
        0x00 => ("NEG", Direct),
        0x03 => ("COM", Direct),
        0x04 => ("LSR", Direct),
        0x06 => ("ROR", Direct),
        0x07 => ("ASR", Direct),
        0x08 => ("ASL", Direct),
        0x09 => ("ROL", Direct),
        0x0a => ("DEC", Direct),
        0x0c => ("INC", Direct),
        0x0d => ("TST", Direct),
        0x0e => ("JMP", Direct),
        0x0f => ("CLR", Direct),
        0x12 => ("NOP", Inherent),
        0x13 => ("SYNC", Inherent),
        0x16 => ("LBRA", Lrelative),
        0x17 => ("LBSR", Lrelative),
        0x19 => ("DAA", Inherent),
        0x1a => ("ORCC", Immediate),
        0x1c => ("ANDCC", Immediate),
        0x1d => ("SEX", Inherent),
        0x1e => ("EXG", RegisterImmediate),
        0x1f => ("TFR", RegisterImmediate),
        0x20 => ("BRA", Relative),
        0x21 => ("BRN", Relative),
        0x22 => ("BHI", Relative),
        0x23 => ("BLS", Relative),
        0x24 => ("BCC", Relative),
        0x25 => ("BCS", Relative),
        0x26 => ("BNE", Relative),
        0x27 => ("BEQ", Relative),
        0x28 => ("BVC", Relative),
        0x29 => ("BVS", Relative),
        0x2a => ("BPL", Relative),
        0x2b => ("BMI", Relative),
        0x2c => ("BGE", Relative),
        0x2d => ("BLT", Relative),
        0x2e => ("BGT", Relative),
        0x2f => ("BLE", Relative),
        0x30 => ("LEAX", Indexed),
        0x31 => ("LEAY", Indexed),
        0x32 => ("LEAS", Indexed),
        0x33 => ("LEAU", Indexed),
        0x34 => ("PSHS", StackImmediate),
        0x35 => ("PULS", StackImmediate),
        0x36 => ("PSHU", StackImmediate),
        0x37 => ("PULU", StackImmediate),
        0x39 => ("RTS", Inherent),
        0x3a => ("ABX", Inherent),
        0x3b => ("RTI", Inherent),
        0x3d => ("MUL", Inherent),
        0x3f => ("SWI", Inherent),
        0x40 => ("NEGA", Inherent),
        0x43 => ("COMA", Inherent),
        0x44 => ("LSRA", Inherent),
        0x46 => ("RORA", Inherent),
        0x47 => ("ASRA", Inherent),
        0x48 => ("ASLA", Inherent),
        0x49 => ("ROLA", Inherent),
        0x4a => ("DECA", Inherent),
        0x4c => ("INCA", Inherent),
        0x4d => ("TSTA", Inherent),
        0x4f => ("CLRA", Inherent),
        0x50 => ("NEGB", Inherent),
        0x53 => ("COMB", Inherent),
        0x54 => ("LSRB", Inherent),
        0x56 => ("RORB", Inherent),
        0x57 => ("ASRB", Inherent),
        0x58 => ("ASLB", Inherent),
        0x59 => ("ROLB", Inherent),
        0x5a => ("DECB", Inherent),
        0x5c => ("INCB", Inherent),
        0x5d => ("TSTB", Inherent),
        0x5f => ("CLRB", Inherent),
        0x60 => ("NEG", Indexed),
        0x63 => ("COM", Indexed),
        0x64 => ("LSR", Indexed),
        0x66 => ("ROR", Indexed),
        0x67 => ("ASR", Indexed),
        0x68 => ("ASL", Indexed),
        0x69 => ("ROL", Indexed),
        0x6a => ("DEC", Indexed),
        0x6c => ("INC", Indexed),
        0x6d => ("TST", Indexed),
        0x6e => ("JMP", Indexed),
        0x6f => ("CLR", Indexed),
        0x70 => ("NEG", Extended),
        0x73 => ("COM", Extended),
        0x74 => ("LSR", Extended),
        0x76 => ("ROR", Extended),
        0x77 => ("ASR", Extended),
        0x78 => ("ASL", Extended),
        0x79 => ("ROL", Extended),
        0x7a => ("DEC", Extended),
        0x7c => ("INC", Extended),
        0x7d => ("TST", Extended),
        0x7e => ("JMP", Extended),
        0x7f => ("CLR", Extended),
        0x80 => ("SUBA", Immediate),
        0x81 => ("CMPA", Immediate),
        0x82 => ("SBCA", Immediate),
        0x83 => ("SUBD", Limmediate),
        0x84 => ("ANDA", Immediate),
        0x85 => ("BITA", Immediate),
        0x86 => ("LDA", Immediate),
        0x88 => ("EORA", Immediate),
        0x89 => ("ADCA", Immediate),
        0x8a => ("ORA", Immediate),
        0x8b => ("ADDA", Immediate),
        0x8c => ("CMPX", Limmediate),
        0x8d => ("BSR", Relative),
        0x8e => ("LDX", Limmediate),
        0x90 => ("SUBA", Direct),
        0x91 => ("CMPA", Direct),
        0x92 => ("SBCA", Direct),
        0x93 => ("SUBD", Direct),
        0x94 => ("ANDA", Direct),
        0x95 => ("BITA", Direct),
        0x96 => ("LDA", Direct),
        0x97 => ("STA", Direct),
        0x98 => ("EORA", Direct),
        0x99 => ("ADCA", Direct),
        0x9a => ("ORA", Direct),
        0x9b => ("ADDA", Direct),
        0x9c => ("CMPX", Direct),
        0x9d => ("JSR", Direct),
        0x9e => ("LDX", Direct),
        0x9f => ("STX", Direct),
        0xbd => ("JSR", Extended),
        _ => return None,
    })
}

/// Decode one instruction starting at `bytes[0]`. Returns mnemonic text and
/// instruction length in bytes. Opcodes this table doesn't recognize (page
/// 1/2 prefixes and the B/Y/U/D/S-register groups) render as a `???` stub
/// whose length defaults to 1, matching the original's `NYE` fallback.
pub fn disassemble(bytes: &[u8]) -> (String, usize) {
    let Some(&opcode) = bytes.first() else {
        return ("???".to_string(), 0);
    };
    let Some((name, mode)) = page0_table(opcode) else {
        return ("???".to_string(), 1);
    };

    match mode {
        Mode::Inherent => (name.to_string(), 1),
        Mode::Direct => (format!("{name} <${:02x}", byte(bytes, 1)), 2),
        Mode::Relative => (format!("{name} *+${:02x}", byte(bytes, 1)), 2),
        Mode::Lrelative => (
            format!("{name} *+${:02x}{:02x}", byte(bytes, 1), byte(bytes, 2)),
            3,
        ),
        Mode::Immediate => (format!("{name} #${:02x}", byte(bytes, 1)), 2),
        Mode::Limmediate => (
            format!("{name} #${:02x}{:02x}", byte(bytes, 1), byte(bytes, 2)),
            3,
        ),
        Mode::Extended => (
            format!("{name} ${:02x}{:02x}", byte(bytes, 1), byte(bytes, 2)),
            3,
        ),
        Mode::RegisterImmediate => {
            let code = byte(bytes, 1);
            (
                format!(
                    "{name} {}, {}",
                    register_name(code >> 4),
                    register_name(code & 0x0f)
                ),
                2,
            )
        }
        Mode::StackImmediate => {
            let mask = byte(bytes, 1);
            let is_u_stack = opcode & 0x02 != 0;
            let is_pull = opcode & 0x01 != 0;
            let indices: Box<dyn Iterator<Item = usize>> = if is_pull {
                Box::new((0..8).rev())
            } else {
                Box::new(0..8)
            };
            let names: Vec<&str> = indices
                .filter(|&i| mask & (0x80 >> i) != 0)
                .map(|i| {
                    let label = STACK_ORDER[i];
                    if label == "OTHER" {
                        if is_u_stack { "S" } else { "U" }
                    } else {
                        label
                    }
                })
                .collect();
            (format!("{name} {}", names.join(",")), 2)
        }
        Mode::Indexed => disassemble_indexed(name, bytes),
    }
}

const STACK_ORDER: [&str; 8] = ["PC", "OTHER", "Y", "X", "DP", "B", "A", "CC"];

fn register_name(code: u8) -> &'static str {
    match code {
        0x0 => "D",
        0x1 => "X",
        0x2 => "Y",
        0x3 => "U",
        0x4 => "S",
        0x5 => "PC",
        0x8 => "A",
        0x9 => "B",
        0xA => "CC",
        0xB => "DP",
        _ => "?",
    }
}

fn byte(bytes: &[u8], index: usize) -> u8 {
    bytes.get(index).copied().unwrap_or(0)
}

fn disassemble_indexed(name: &str, bytes: &[u8]) -> (String, usize) {
    let postbyte = byte(bytes, 1);
    let reg = INDEX_REGISTERS[usize::from((postbyte & 0x60) >> 5)];

    if postbyte & 0x80 == 0 {
        let offset = postbyte & 0x1f;
        return if offset > 0x0f {
            (format!("{name} -${:02x},{reg}", 32 - offset), 2)
        } else {
            (format!("{name} ${offset:02x},{reg}"), 2)
        };
    }

    let indirect = postbyte & 0x10 != 0;
    let (operand, extra) = match postbyte & 0x0f {
        0x00 => (format!(",{reg}+"), 0),
        0x01 => (format!(",{reg}++"), 0),
        0x02 => (format!(",-{reg}"), 0),
        0x03 => (format!(",--{reg}"), 0),
        0x04 => (format!(",{reg}"), 0),
        0x05 => (format!("B,{reg}"), 0),
        0x06 => (format!("A,{reg}"), 0),
        0x08 => (format!("${:02x},{reg}", byte(bytes, 2)), 1),
        0x09 => (format!("${:02x}{:02x},{reg}", byte(bytes, 2), byte(bytes, 3)), 2),
        0x0b => (format!("D,{reg}"), 0),
        0x0c => (format!("${:02x},PC", byte(bytes, 2)), 1),
        0x0d => (format!("${:02x}{:02x},PC", byte(bytes, 2), byte(bytes, 3)), 2),
        0x0f => (format!("[${:02x}{:02x}]", byte(bytes, 2), byte(bytes, 3)), 2),
        _ => ("???".to_string(), 0),
    };
    let operand = if indirect && !operand.starts_with('[') {
        format!("[{operand}]")
    } else {
        operand
    };
    (format!("{name} {operand}"), 2 + extra)
}
