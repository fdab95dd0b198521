//! Stack push/pull, subroutine linkage, and interrupt entry/exit.

use emu_core::Bus;

use crate::flags::{FLAG_E, FLAG_F, FLAG_I};
use crate::Mc6809;

impl Mc6809 {
    fn push8<B: Bus>(&mut self, bus: &mut B, stack_is_s: bool, value: u8) {
        let sp = if stack_is_s { &mut self.s } else { &mut self.u };
        *sp = sp.wrapping_sub(1);
        let addr = *sp;
        bus.write(addr, value);
        self.extra_cycles += 1;
    }

    fn push16<B: Bus>(&mut self, bus: &mut B, stack_is_s: bool, value: u16) {
        let sp = if stack_is_s { &mut self.s } else { &mut self.u };
        *sp = sp.wrapping_sub(2);
        let addr = *sp;
        bus.writew(addr, value);
        self.extra_cycles += 2;
    }

    fn pull8<B: Bus>(&mut self, bus: &mut B, stack_is_s: bool) -> u8 {
        let sp = if stack_is_s { self.s } else { self.u };
        let value = bus.read(sp);
        if stack_is_s {
            self.s = self.s.wrapping_add(1);
        } else {
            self.u = self.u.wrapping_add(1);
        }
        self.extra_cycles += 1;
        value
    }

    fn pull16<B: Bus>(&mut self, bus: &mut B, stack_is_s: bool) -> u16 {
        let sp = if stack_is_s { self.s } else { self.u };
        let value = bus.readw(sp);
        if stack_is_s {
            self.s = self.s.wrapping_add(2);
        } else {
            self.u = self.u.wrapping_add(2);
        }
        self.extra_cycles += 2;
        value
    }

    /// `PSHS`/`PSHU`: push the registers named by `postbyte`'s bit mask,
    /// highest register first, onto `S` (if `stack_is_s`) or `U`.
    pub(crate) fn push_registers<B: Bus>(&mut self, bus: &mut B, postbyte: u8, stack_is_s: bool) {
        let other_stack = if stack_is_s { self.u } else { self.s };
        if postbyte & 0x80 != 0 {
            self.push16(bus, stack_is_s, self.pc);
        }
        if postbyte & 0x40 != 0 {
            self.push16(bus, stack_is_s, other_stack);
        }
        if postbyte & 0x20 != 0 {
            self.push16(bus, stack_is_s, self.y);
        }
        if postbyte & 0x10 != 0 {
            self.push16(bus, stack_is_s, self.x);
        }
        if postbyte & 0x08 != 0 {
            self.push8(bus, stack_is_s, self.dp);
        }
        if postbyte & 0x04 != 0 {
            self.push8(bus, stack_is_s, self.b);
        }
        if postbyte & 0x02 != 0 {
            self.push8(bus, stack_is_s, self.a);
        }
        if postbyte & 0x01 != 0 {
            self.push8(bus, stack_is_s, self.cc);
        }
    }

    /// `PULS`/`PULU`: pull the registers named by `postbyte`'s bit mask,
    /// lowest register first, from `S` or `U`.
    pub(crate) fn pull_registers<B: Bus>(&mut self, bus: &mut B, postbyte: u8, stack_is_s: bool) {
        if postbyte & 0x01 != 0 {
            self.cc = self.pull8(bus, stack_is_s);
        }
        if postbyte & 0x02 != 0 {
            self.a = self.pull8(bus, stack_is_s);
        }
        if postbyte & 0x04 != 0 {
            self.b = self.pull8(bus, stack_is_s);
        }
        if postbyte & 0x08 != 0 {
            self.dp = self.pull8(bus, stack_is_s);
        }
        if postbyte & 0x10 != 0 {
            self.x = self.pull16(bus, stack_is_s);
        }
        if postbyte & 0x20 != 0 {
            self.y = self.pull16(bus, stack_is_s);
        }
        if postbyte & 0x40 != 0 {
            let value = self.pull16(bus, stack_is_s);
            if stack_is_s {
                self.u = value;
            } else {
                self.s = value;
            }
        }
        if postbyte & 0x80 != 0 {
            self.pc = self.pull16(bus, stack_is_s);
        }
    }

    pub(crate) fn jsr<B: Bus>(&mut self, bus: &mut B, address: u16) {
        self.push16(bus, true, self.pc);
        self.pc = address;
    }

    pub(crate) fn rts<B: Bus>(&mut self, bus: &mut B) {
        self.pc = self.pull16(bus, true);
    }

    /// Full (SWI) state save: entire register set plus both interrupt masks.
    fn full_interrupt_entry<B: Bus>(&mut self, bus: &mut B) {
        self.set_flag(FLAG_E, true);
        self.push16(bus, true, self.pc);
        self.push16(bus, true, self.u);
        self.push16(bus, true, self.y);
        self.push16(bus, true, self.x);
        self.push8(bus, true, self.dp);
        self.push8(bus, true, self.b);
        self.push8(bus, true, self.a);
        self.push8(bus, true, self.cc);
    }

    pub(crate) fn swi<B: Bus>(&mut self, bus: &mut B) {
        self.full_interrupt_entry(bus);
        self.set_flag(FLAG_F, true);
        self.set_flag(FLAG_I, true);
        self.pc = bus.readw(0xfffa);
    }

    pub(crate) fn swi2<B: Bus>(&mut self, bus: &mut B) {
        self.full_interrupt_entry(bus);
        self.pc = bus.readw(0xfff4);
    }

    pub(crate) fn swi3<B: Bus>(&mut self, bus: &mut B) {
        self.full_interrupt_entry(bus);
        self.pc = bus.readw(0xfff2);
    }

    /// `RTI`: pull CC, then (if E was set) the rest of the full register
    /// set, then PC.
    pub(crate) fn rti<B: Bus>(&mut self, bus: &mut B) {
        self.cc = self.pull8(bus, true);
        if self.entire() {
            self.a = self.pull8(bus, true);
            self.b = self.pull8(bus, true);
            self.dp = self.pull8(bus, true);
            self.x = self.pull16(bus, true);
            self.y = self.pull16(bus, true);
            self.u = self.pull16(bus, true);
        }
        self.pc = self.pull16(bus, true);
    }

    /// IRQ entry: full state save (E set), mask I, vector via `$FFF8`.
    pub(crate) fn enter_irq<B: Bus>(&mut self, bus: &mut B) {
        self.full_interrupt_entry(bus);
        self.set_flag(FLAG_I, true);
        self.pc = bus.readw(0xfff8);
    }

    /// FIRQ entry: PC/CC only (E cleared), mask both I and F, vector via
    /// `$FFF6`.
    pub(crate) fn enter_firq<B: Bus>(&mut self, bus: &mut B) {
        self.set_flag(FLAG_E, false);
        self.push16(bus, true, self.pc);
        self.push8(bus, true, self.cc);
        self.set_flag(FLAG_F, true);
        self.set_flag(FLAG_I, true);
        self.pc = bus.readw(0xfff6);
    }

    /// NMI entry: full state save (E set), mask both I and F, vector via
    /// `$FFFC`. Unmaskable: serviced regardless of the I/F flags.
    pub(crate) fn enter_nmi<B: Bus>(&mut self, bus: &mut B) {
        self.full_interrupt_entry(bus);
        self.set_flag(FLAG_F, true);
        self.set_flag(FLAG_I, true);
        self.pc = bus.readw(0xfffc);
    }
}
