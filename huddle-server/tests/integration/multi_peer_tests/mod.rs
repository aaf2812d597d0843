mod test_peer_leaves_others_stay;
mod test_peer_switches_rooms;
