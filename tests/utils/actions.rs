use serde_json::json;

/// Builder for a `POST /games` payload
#[derive(Debug, Clone)]
pub struct GameRequest {
    player_name: String,
    status: &'static str,
    win_amount: i32,
    potential_amount: i32,
    vaults_opened: i32,
    total_rounds: i32,
    stop_vault: i32,
    is_jackpot: bool,
}

impl GameRequest {
    fn new(player_name: &str, status: &'static str) -> Self {
        Self {
            player_name: player_name.to_string(),
            status,
            win_amount: 0,
            potential_amount: 0,
            vaults_opened: 5,
            total_rounds: 10,
            stop_vault: 0,
            is_jackpot: false,
        }
    }

    /// Player banked `win_amount` after `vaults_opened` vaults
    pub fn stop(player_name: &str, win_amount: i32, potential_amount: i32) -> Self {
        let mut game = Self::new(player_name, "WinStop");
        game.win_amount = win_amount;
        game.potential_amount = potential_amount;
        game.stop_vault = game.vaults_opened;
        game
    }

    pub fn jackpot(player_name: &str, amount: i32) -> Self {
        let mut game = Self::new(player_name, "Win");
        game.win_amount = amount;
        game.potential_amount = amount;
        game.vaults_opened = game.total_rounds;
        game.is_jackpot = true;
        game
    }

    pub fn bust(player_name: &str) -> Self {
        let mut game = Self::new(player_name, "Lose");
        game.vaults_opened = game.total_rounds;
        game
    }

    pub fn vaults(mut self, vaults_opened: i32, total_rounds: i32) -> Self {
        self.vaults_opened = vaults_opened;
        self.total_rounds = total_rounds;
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "player_name": self.player_name,
            "status": self.status,
            "win_amount": self.win_amount,
            "potential_amount": self.potential_amount,
            "vaults_opened": self.vaults_opened,
            "total_rounds": self.total_rounds,
            "stop_vault": self.stop_vault,
            "is_jackpot": self.is_jackpot,
        })
    }
}
