/// Commands the adapter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Returns the payload byte. Link test.
    Echo,
    /// Adapter identification and versions.
    Info,
    /// Writes N bytes to an I2C device.
    Write,
    /// Reads N bytes from an I2C device.
    Read,
    /// Re-initializes the I2C peripheral.
    Reset,
    SetPinMode,
    ReadPins,
    WritePins,
}

impl Command {
    pub const fn selector(self) -> u8 {
        match self {
            Command::Echo => b'e',
            Command::Info => b'i',
            Command::Write => b'w',
            Command::Read => b'r',
            Command::Reset => b't',
            Command::SetPinMode => b'm',
            Command::ReadPins => b'a',
            Command::WritePins => b'b',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Command::Echo => "ECHO",
            Command::Info => "INFO",
            Command::Write => "WRITE",
            Command::Read => "READ",
            Command::Reset => "RESET",
            Command::SetPinMode => "SET-PIN-MODE",
            Command::ReadPins => "READ-PINS",
            Command::WritePins => "WRITE-PINS",
        }
    }
}

const BASIC_COMMANDS: &[Command] = &[
    Command::Echo,
    Command::Info,
    Command::Write,
    Command::Read,
    Command::Reset,
];

const EXTENDED_COMMANDS: &[Command] = &[
    Command::Echo,
    Command::Info,
    Command::Write,
    Command::Read,
    Command::Reset,
    Command::SetPinMode,
    Command::ReadPins,
    Command::WritePins,
];

/// Which selector table the adapter answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSet {
    /// Bus commands only
    Basic,
    /// Bus commands and the auxiliary pins
    Extended,
}

impl CommandSet {
    pub const fn commands(self) -> &'static [Command] {
        match self {
            CommandSet::Basic => BASIC_COMMANDS,
            CommandSet::Extended => EXTENDED_COMMANDS,
        }
    }

    pub fn lookup(self, selector: u8) -> Option<Command> {
        self.commands()
            .iter()
            .copied()
            .find(|cmd| cmd.selector() == selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_are_unique() {
        for set in [CommandSet::Basic, CommandSet::Extended] {
            let cmds = set.commands();
            for (i, a) in cmds.iter().enumerate() {
                for b in &cmds[i + 1..] {
                    assert_ne!(a.selector(), b.selector(), "{} / {}", a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(CommandSet::Basic.lookup(b'w'), Some(Command::Write));
        assert_eq!(CommandSet::Basic.lookup(b'm'), None);
        assert_eq!(CommandSet::Basic.lookup(b'a'), None);
        assert_eq!(CommandSet::Extended.lookup(b'm'), Some(Command::SetPinMode));
        assert_eq!(CommandSet::Extended.lookup(b'b'), Some(Command::WritePins));
        assert_eq!(CommandSet::Extended.lookup(b'z'), None);
        assert_eq!(CommandSet::Extended.lookup(b'E'), None);
    }

    #[test]
    fn extended_is_a_superset() {
        for cmd in CommandSet::Basic.commands() {
            assert_eq!(CommandSet::Extended.lookup(cmd.selector()), Some(*cmd));
        }
    }
}
