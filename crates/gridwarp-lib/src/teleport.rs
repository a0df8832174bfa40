//! Classification of the directed relationship between two nodes with
//! respect to tunnel chains and wormhole pairings.

use serde::Serialize;

/// The sixteen ways an ordered pair of nodes can relate through the
/// teleporter topology.
///
/// Naming follows the pattern `<Start><End>` with an infix qualifier:
/// `To` means the start's forward chain (or wormhole pairing) reaches the
/// end, `Ot` means the end's forward chain reaches back to the start. The
/// unqualified forms mean the two nodes have those kinds but no chain or
/// pairing connects them.
///
/// The search driver and the orthogonal teleport policy treat each variant
/// differently (zero-cost edges, jump-point cuts, forced intermediate
/// points), so the cases must not be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeleporterType {
    /// Plain cell to plain cell; ordinary grid movement.
    NormalNormal,
    /// Plain cell onto an unrelated tunnel entrance.
    NormalTunnel,
    /// Plain cell onto a tunnel whose chain exits back onto that cell.
    NormalOtTunnel,
    /// Plain cell onto a wormhole.
    NormalWormhole,
    /// Tunnel to an unrelated plain cell.
    TunnelNormal,
    /// Tunnel to the plain cell its chain exits onto.
    TunnelToNormal,
    /// Two tunnels with no chain between them.
    TunnelTunnel,
    /// Tunnel to a tunnel further along its own chain.
    TunnelToTunnel,
    /// Tunnel to a tunnel earlier in its own chain.
    TunnelOtTunnel,
    /// Tunnel to an unrelated wormhole.
    TunnelWormhole,
    /// Tunnel to a wormhole reached by its chain (either end of the pair).
    TunnelToWormhole,
    /// Wormhole to a plain cell.
    WormholeNormal,
    /// Wormhole to an unrelated tunnel.
    WormholeTunnel,
    /// Wormhole to a tunnel whose chain reaches this wormhole.
    WormholeOtTunnel,
    /// Two wormholes from different pairings.
    WormholeWormhole,
    /// A wormhole and its own peer.
    WormholeToWormhole,
}
