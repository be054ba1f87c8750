//! Built-in event content.

use super::catalog::EventCatalog;
use super::template::{EventTemplate, MovementEffect};
use crate::board::TileCategory;

pub(super) fn standard_catalog() -> EventCatalog {
    EventCatalog::new()
        .with_pool(TileCategory::Danger, danger())
        .with_pool(TileCategory::Trivia, trivia())
        .with_pool(TileCategory::Social, social())
        .with_pool(TileCategory::Luck, luck())
        .with_pool(TileCategory::Duel, duel())
}

fn danger() -> Vec<EventTemplate> {
    vec![
        EventTemplate::new("EARTHQUAKE! Everyone moves one seat to the left.").timed(10),
        EventTemplate::new("Do 10 push-ups or go back 3 tiles.")
            .penalty(3)
            .action("Fail: -3")
            .timed(20),
        EventTemplate::new("Hold a wall squat until your next turn.")
            .penalty(2)
            .action("Fall: -2"),
        EventTemplate::new("The floor is lava: get on a chair NOW.")
            .penalty(5)
            .action("Last one: -5")
            .timed(5),
        EventTemplate::new("Hold a yoga bridge for 10 seconds.")
            .penalty(2)
            .action("Fail and go back 2")
            .timed(15),
        EventTemplate::new("Crab-walk around the table.").timed(20),
        EventTemplate::new("Play with your eyes closed until your next turn."),
    ]
}

fn trivia() -> Vec<EventTemplate> {
    vec![
        EventTemplate::new("What is the capital of Australia?")
            .answer("Canberra")
            .bonus(1)
            .action("Right answer: +1")
            .timed(10),
        EventTemplate::new("In what year did humans first land on the Moon?")
            .answer("1969")
            .penalty(2)
            .action("Wrong answer: -2")
            .timed(10),
        EventTemplate::new("Who sang 'Thriller'?")
            .answer("Michael Jackson")
            .bonus(2)
            .action("+2 if you sing it")
            .timed(15),
        EventTemplate::new("How many hearts does an octopus have?")
            .answer("Three")
            .bonus(2)
            .action("Right answer: +2")
            .timed(10),
        EventTemplate::new("Which ingredient does NOT belong on a Hawaiian pizza?")
            .answer("Good taste (kidding: pineapple)"),
        EventTemplate::new("Finish the saying: 'The early bird...'")
            .answer("...catches the worm")
            .bonus(1)
            .action("+1")
            .timed(10),
    ]
}

fn social() -> Vec<EventTemplate> {
    vec![
        EventTemplate::new("Send a voice note singing to your ex (or your mum).")
            .penalty(5)
            .action("Do it or -5")
            .timed(30),
        EventTemplate::new("Let the group read your last text message.")
            .penalty(3)
            .action("Do it or -3")
            .timed(15),
        EventTemplate::new("Impersonate another player. If they guess who, you advance.")
            .bonus(2)
            .action("+2 if they guess")
            .timed(20),
        EventTemplate::new("Call a pizza place and order a burger.")
            .penalty(4)
            .action("Do it or -4")
            .timed(45),
        EventTemplate::new("Speak with a foreign accent until your next turn."),
        EventTemplate::new("Pick someone to tickle you for 10 seconds.")
            .penalty(2)
            .action("Hold out or -2")
            .timed(15),
    ]
}

fn luck() -> Vec<EventTemplate> {
    vec![
        EventTemplate::new("A taxi gives you a lift!").bonus(3).action("+3!"),
        EventTemplate::new("You forgot your wallet. Go back for it.")
            .penalty(2)
            .action("-2"),
        EventTemplate::new("You found some money.").bonus(1).action("+1"),
        EventTemplate::new("Secret shortcut unlocked.")
            .with_effect(MovementEffect::Bonus(5))
            .action("MEGA JUMP +5!"),
        EventTemplate::new("Flat tyre. You lose a turn.").action("Pass the die"),
        EventTemplate::new("Swap places with the player in last place.")
            .action("Swap!"),
    ]
}

fn duel() -> Vec<EventTemplate> {
    vec![
        EventTemplate::new("Rock, paper, scissors with the player on your right.")
            .penalty(2)
            .action("Loser goes back 2"),
        EventTemplate::new("Staring contest with the player on your left.")
            .action("First to blink loses"),
        EventTemplate::new("Thumb war with anyone you choose.")
            .bonus(2)
            .action("Winner advances 2"),
        EventTemplate::new("Everyone votes: who is the biggest smooth talker?")
            .penalty(3)
            .action("The chosen one goes back 3"),
    ]
}
