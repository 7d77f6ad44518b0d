use anchor_lang::prelude::*;

#[event]
pub struct CoreStateInitialized {
    pub admin: Pubkey,
    pub core_state: Pubkey,
    pub executer: Pubkey,
    pub fee_bps: u16,
    pub win_ratio_bps: u16,
}

#[event]
pub struct CoreStateUpdated {
    pub admin: Pubkey,
    pub fee_bps: u16,
    pub win_ratio_bps: u16,
    pub active: bool,
    pub allow_direct_bet: bool,
    pub version: u8,
}

#[event]
pub struct ExecuterChanged {
    pub admin: Pubkey,
    pub old_executer: Pubkey,
    pub new_executer: Pubkey,
}
