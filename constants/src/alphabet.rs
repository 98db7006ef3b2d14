/// Letters handled by the flashcard deck, in registration order.
pub const ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

pub struct MnemonicInfo {
    pub letter: char,
    pub name: &'static str,
}

pub const MNEMONIC_MAP: &[MnemonicInfo] = &[
    MnemonicInfo { letter: 'A', name: "Apple" },
    MnemonicInfo { letter: 'B', name: "Ball" },
    MnemonicInfo { letter: 'C', name: "Cat" },
    MnemonicInfo { letter: 'D', name: "Dog" },
    MnemonicInfo { letter: 'E', name: "Elephant" },
    MnemonicInfo { letter: 'F', name: "Fish" },
    MnemonicInfo { letter: 'G', name: "Grapes" },
    MnemonicInfo { letter: 'H', name: "House" },
    MnemonicInfo { letter: 'I', name: "Ice Cream" },
    MnemonicInfo { letter: 'J', name: "Jug" },
    MnemonicInfo { letter: 'K', name: "Kite" },
    MnemonicInfo { letter: 'L', name: "Lion" },
    MnemonicInfo { letter: 'M', name: "Monkey" },
    MnemonicInfo { letter: 'N', name: "Nest" },
    MnemonicInfo { letter: 'O', name: "Orange" },
    MnemonicInfo { letter: 'P', name: "Parrot" },
    MnemonicInfo { letter: 'Q', name: "Queen" },
    MnemonicInfo { letter: 'R', name: "Rabbit" },
    MnemonicInfo { letter: 'S', name: "Sun" },
    MnemonicInfo { letter: 'T', name: "Tiger" },
    MnemonicInfo { letter: 'U', name: "Umbrella" },
    MnemonicInfo { letter: 'V', name: "Van" },
    MnemonicInfo { letter: 'W', name: "Watch" },
    MnemonicInfo { letter: 'X', name: "Xylophone" },
    MnemonicInfo { letter: 'Y', name: "Yak" },
    MnemonicInfo { letter: 'Z', name: "Zebra" },
];

pub fn get_mnemonic(letter: char) -> Option<&'static str> {
    MNEMONIC_MAP
        .iter()
        .find(|m| m.letter == letter.to_ascii_uppercase())
        .map(|m| m.name)
}
